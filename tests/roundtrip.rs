use proptest::prelude::*;
use rjs::prelude::*;
use rjs_strategy::arb_value;

proptest! {
    #![proptest_config(ProptestConfig { cases: 500, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(value in arb_value()) {
        let registry = Registry::with_builtins();

        let encoded = encode_full(&registry, &value).unwrap();
        let decoded = decode_full(&registry, encoded).unwrap();

        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn encode_decode_with_header(value in arb_value()) {
        let registry = Registry::with_builtins();

        let encoded = encode_with_header(&registry, &value).unwrap();
        let decoded = decode_with_header(&registry, &mut ByteReader::from(encoded)).unwrap();

        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn strict_prefixes_never_decode(
        value in arb_value(),
        index in any::<prop::sample::Index>(),
    ) {
        let registry = Registry::with_builtins();

        let encoded = encode_full(&registry, &value).unwrap();
        let cut = index.index(encoded.len());

        prop_assert!(decode_full(&registry, encoded[..cut].to_vec()).is_err());
    }
}
