//! The process-lifetime table of type bindings.
//!
//! A [`Registry`] is an ordered, append-only sequence of [`Binding`]s. Both
//! lookups (by a value's exact [`TypeTag`] when encoding, by decoded name
//! when decoding) are linear scans that return the **first** match. Entries
//! are never removed, deduplicated, or reordered, so registering a duplicate
//! tag or name is permitted and simply leaves the earlier binding in control.
//! Two distinct types sharing a name are therefore indistinguishable at
//! decode time; this is a documented property of the format, not an accident.
//!
//! Lookups take `&self` and are safe to run from many threads at once.
//! Registration takes `&mut self`: interleaving it with concurrent use
//! requires external synchronisation, which the borrow checker insists on.
//!
//! # Example
//!
//! ```
//! use rjs::prelude::*;
//!
//! let mut registry = Registry::with_builtins();
//! registry.register_record("point", &["x", "y"]);
//!
//! let point = Value::from(Record::new("point", vec![Value::from(3), Value::from(4)]));
//!
//! let encoded = encode_full(&registry, &point).unwrap();
//! assert_eq!(decode_full(&registry, encoded).unwrap(), point);
//! ```

use crate::{
    encoding::{self, ByteReader},
    errors::{AliasError, DeserialiseError, SerialiseError},
    Record, Value,
};
use bytes::Bytes;
use std::{fmt, sync::Arc};

/// The dispatch identifier a type is registered under.
///
/// A tag carries the short, unqualified name that goes on the wire. Names are
/// deliberately not globally unique identifiers: nothing stops a
/// [`Named`](TypeTag::Named) tag from reusing a built-in name, and collisions
/// resolve to whichever binding was registered first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    None,
    Bool,
    Int,
    Float,
    Complex,
    Bytes,
    Str,
    List,
    Tuple,
    Set,
    FrozenSet,
    Deque,
    Map,
    OrdMap,
    /// A user-registered type, identified by its name.
    Named(String),
}

impl TypeTag {
    /// The short wire name of this tag.
    pub fn name(&self) -> &str {
        match self {
            TypeTag::None => "none",
            TypeTag::Bool => "bool",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Complex => "complex",
            TypeTag::Bytes => "bytes",
            TypeTag::Str => "str",
            TypeTag::List => "list",
            TypeTag::Tuple => "tuple",
            TypeTag::Set => "set",
            TypeTag::FrozenSet => "frozenset",
            TypeTag::Deque => "deque",
            TypeTag::Map => "map",
            TypeTag::OrdMap => "ordmap",
            TypeTag::Named(name) => name,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.name()) }
}

/// Turns a value into the payload bytes of its record; framing happens a
/// layer up, in [`encoding::encode`].
pub type EncodeFn =
    Box<dyn Fn(&Registry, &Value) -> Result<Vec<u8>, SerialiseError> + Send + Sync>;

/// Consumes the payload bytes of one record and rebuilds the value.
pub type DecodeFn = Box<dyn Fn(&Registry, Bytes) -> Result<Value, DeserialiseError> + Send + Sync>;

/// One `(type, encode, decode)` binding.
pub struct Binding {
    tag: TypeTag,
    encode: EncodeFn,
    decode: DecodeFn,
}

impl Binding {
    /// The tag this binding dispatches on.
    pub fn tag(&self) -> &TypeTag { &self.tag }

    /// The name this binding answers to at decode time.
    pub fn type_name(&self) -> &str { self.tag.name() }

    /// Runs the encoder, producing payload bytes.
    pub fn encode_payload(
        &self,
        registry: &Registry,
        value: &Value,
    ) -> Result<Vec<u8>, SerialiseError> {
        (self.encode)(registry, value)
    }

    /// Runs the decoder over payload bytes.
    pub fn decode_payload(
        &self,
        registry: &Registry,
        payload: Bytes,
    ) -> Result<Value, DeserialiseError> {
        (self.decode)(registry, payload)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Binding").field("tag", &self.tag).finish()
    }
}

/// One field of a type registered through
/// [`register_by_fields`](Registry::register_by_fields).
pub struct FieldBinding {
    /// Field name. Kept for diagnostics; the wire carries no field names.
    pub name: &'static str,
    /// Reads the field's current value out of an instance.
    pub get: Box<dyn Fn(&Value) -> Result<Value, SerialiseError> + Send + Sync>,
    /// Writes a decoded value into an instance under construction.
    pub set: Box<dyn Fn(&mut Value, Value) -> Result<(), DeserialiseError> + Send + Sync>,
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FieldBinding").field("name", &self.name).finish()
    }
}

/// The binding table. See the [module level documentation](crate::registry).
#[derive(Debug, Default)]
pub struct Registry {
    bindings: Vec<Binding>,
}

impl Registry {
    /// Creates an empty registry with no bindings at all.
    pub fn new() -> Registry { Registry { bindings: Vec::new() } }

    /// Creates a registry preloaded with the built-in bindings.
    pub fn with_builtins() -> Registry {
        let mut registry = Registry::new();
        crate::bindings::install(&mut registry);
        registry
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize { self.bindings.len() }

    /// Indicates whether the registry has no bindings.
    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }

    /// Appends a binding.
    ///
    /// Earlier bindings always win lookups, so re-registering an existing tag
    /// or name has no effect on dispatch.
    pub fn register(&mut self, tag: TypeTag, encode: EncodeFn, decode: DecodeFn) {
        self.bindings.push(Binding { tag, encode, decode });
    }

    /// Registers `tag` with codecs derived from an ordered field list.
    ///
    /// Encoding reads each field with its accessor and writes the results as
    /// consecutive self-describing records. Decoding builds an instance with
    /// `empty` (no field-validating construction runs), then assigns the
    /// fields in order from consecutive decodes. Payload bytes past the last
    /// field are ignored.
    pub fn register_by_fields(
        &mut self,
        tag: TypeTag,
        fields: Vec<FieldBinding>,
        empty: Box<dyn Fn() -> Value + Send + Sync>,
    ) {
        let fields = Arc::new(fields);
        let enc_fields = fields.clone();
        let encode: EncodeFn = Box::new(move |registry, value| {
            let mut payload = Vec::new();
            for field in enc_fields.iter() {
                let field_value = (field.get)(value)?;
                encoding::encode(registry, &field_value, &mut payload)?;
            }
            Ok(payload)
        });
        let decode: DecodeFn = Box::new(move |registry, payload| {
            let input = &mut ByteReader::new(payload);
            let mut value = empty();
            for field in fields.iter() {
                let field_value = encoding::decode(registry, input)?;
                (field.set)(&mut value, field_value)?;
            }
            Ok(value)
        });
        self.register(tag, encode, decode);
    }

    /// Registers a [`Record`] type from its field names alone.
    ///
    /// Fields are stored positionally in the given order; this is
    /// [`register_by_fields`](Registry::register_by_fields) specialised to
    /// records, with an empty constructor that fills every field with
    /// [`Value::None`].
    pub fn register_record(&mut self, name: &'static str, field_names: &'static [&'static str]) {
        let arity = field_names.len();
        let fields = field_names
            .iter()
            .enumerate()
            .map(|(index, &field_name)| FieldBinding {
                name: field_name,
                get: Box::new(move |value| match value {
                    Value::Record(record) => {
                        record.field(index).cloned().ok_or_else(|| {
                            SerialiseError::UnexpectedShape {
                                expected: field_name,
                                found: value.type_tag(),
                            }
                        })
                    }
                    other => Err(SerialiseError::UnexpectedShape {
                        expected: "record",
                        found: other.type_tag(),
                    }),
                }),
                set: Box::new(move |value, field_value| match value {
                    Value::Record(record) => {
                        record.set_field(index, field_value);
                        Ok(())
                    }
                    other => Err(DeserialiseError::UnexpectedShape {
                        expected: "record",
                        found: other.type_tag().to_string(),
                    }),
                }),
            })
            .collect();
        let empty: Box<dyn Fn() -> Value + Send + Sync> =
            Box::new(move || Value::Record(Record::empty(name, arity)));
        self.register_by_fields(TypeTag::Named(name.to_string()), fields, empty);
    }

    /// Appends a binding for `alias` that borrows `base`'s codec through a
    /// conversion pair.
    ///
    /// `to_base` converts an alias value into the base type before encoding;
    /// `from_base` converts a decoded base value back into the alias type.
    /// The base binding is resolved on every call, so the first binding for
    /// `base` stays in control even if more are registered later.
    ///
    /// Fails if `base` has no binding at registration time.
    pub fn register_alias(
        &mut self,
        base: TypeTag,
        alias: TypeTag,
        to_base: Box<dyn Fn(&Value) -> Result<Value, SerialiseError> + Send + Sync>,
        from_base: Box<dyn Fn(Value) -> Result<Value, DeserialiseError> + Send + Sync>,
    ) -> Result<(), AliasError> {
        if self.binding_tagged(&base).is_none() {
            return Err(AliasError { alias, base });
        }
        let enc_base = base.clone();
        let dec_base = base;
        let encode: EncodeFn = Box::new(move |registry, value| {
            let base_value = to_base(value)?;
            let binding = registry
                .binding_tagged(&enc_base)
                .ok_or_else(|| SerialiseError::UnregisteredType(enc_base.clone()))?;
            binding.encode_payload(registry, &base_value)
        });
        let decode: DecodeFn = Box::new(move |registry, payload| {
            let binding = registry
                .binding_tagged(&dec_base)
                .ok_or_else(|| DeserialiseError::UnknownType(dec_base.name().to_string()))?;
            let base_value = binding.decode_payload(registry, payload)?;
            from_base(base_value)
        });
        self.register(alias, encode, decode);
        Ok(())
    }

    /// First binding whose tag matches the value's exact type, if any.
    ///
    /// There is no fallback of any kind: a value either carries a registered
    /// tag or it does not encode.
    pub fn binding_for(&self, value: &Value) -> Option<&Binding> {
        self.binding_tagged(&value.type_tag())
    }

    /// First binding registered under exactly `tag`.
    pub fn binding_tagged(&self, tag: &TypeTag) -> Option<&Binding> {
        self.bindings.iter().find(|binding| binding.tag == *tag)
    }

    /// First binding whose type name is `name`.
    pub fn binding_named(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|binding| binding.tag.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_over_missing_base_is_rejected() {
        let mut registry = Registry::new();
        let err = registry
            .register_alias(
                TypeTag::List,
                TypeTag::Tuple,
                Box::new(|v| Ok(v.clone())),
                Box::new(Ok),
            )
            .unwrap_err();

        assert_eq!(
            err,
            AliasError {
                alias: TypeTag::Tuple,
                base: TypeTag::List,
            }
        );
    }

    #[test]
    fn lookups_hit_the_first_binding() {
        let mut registry = Registry::new();
        registry.register(
            TypeTag::Named("thing".to_string()),
            Box::new(|_, _| Ok(vec![1])),
            Box::new(|_, _| Ok(Value::None)),
        );
        registry.register(
            TypeTag::Named("thing".to_string()),
            Box::new(|_, _| Ok(vec![2])),
            Box::new(|_, _| Ok(Value::Bool(false))),
        );

        assert_eq!(registry.len(), 2);
        let found = registry.binding_named("thing").unwrap();
        let payload = found.encode_payload(&registry, &Value::None).unwrap();
        assert_eq!(payload, vec![1]);
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}
