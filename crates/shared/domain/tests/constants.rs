use rcfg_domain::constants::{CONDITION_KEYS, ENVELOPE_DATA, ENVELOPE_SIGNATURE};

#[test]
fn condition_keys_are_the_wire_names() {
    assert_eq!(
        CONDITION_KEYS,
        ["platform", "platformVersion", "appVersion", "variant", "buildVariant", "language"]
    );
}

#[test]
fn envelope_keys_are_short() {
    assert_eq!(ENVELOPE_DATA, "d");
    assert_eq!(ENVELOPE_SIGNATURE, "sig");
}
