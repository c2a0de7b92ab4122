//! End-to-end tests: JSON ABI in, call data out

use calldata_abi::{
    selector_from_signature, AbiError, EventDef, EventParam, FunctionDef, Interface, Param,
    StateMutability, Token,
};
use calldata_primitives::Address;

/// Compiler output for a contract holding one `uint32` with a setter,
/// an incrementer and two getters
const COUNTER_ABI: &str = r#"[
    {
        "inputs": [{"internalType": "uint32", "name": "val", "type": "uint32"}],
        "stateMutability": "nonpayable",
        "type": "constructor"
    },
    {
        "inputs": [],
        "name": "_value",
        "outputs": [{"internalType": "uint32", "name": "", "type": "uint32"}],
        "stateMutability": "view",
        "type": "function"
    },
    {
        "inputs": [],
        "name": "increment",
        "outputs": [{"internalType": "uint32", "name": "", "type": "uint32"}],
        "stateMutability": "nonpayable",
        "type": "function"
    },
    {
        "inputs": [{"internalType": "uint32", "name": "val", "type": "uint32"}],
        "name": "setValue",
        "outputs": [],
        "stateMutability": "nonpayable",
        "type": "function"
    },
    {
        "inputs": [],
        "name": "value",
        "outputs": [{"internalType": "uint32", "name": "", "type": "uint32"}],
        "stateMutability": "view",
        "type": "function"
    }
]"#;

fn counter() -> Interface {
    Interface::from_json(COUNTER_ABI).unwrap()
}

// ==================== Function Call Data ====================

#[test]
fn test_set_value_call_data() {
    let data = counter()
        .encode_function_call_data("setValue", &[Token::uint(12345u64)])
        .unwrap();

    assert_eq!(data.len(), 36);
    assert_eq!(&data[..4], &selector_from_signature("setValue(uint32)"));
    assert_eq!(
        hex::encode(&data[4..]),
        "0000000000000000000000000000000000000000000000000000000000003039"
    );
}

#[test]
fn test_set_value_selector_is_stable() {
    let interface = counter();
    let a = interface
        .encode_function_call_data("setValue", &[Token::uint(1u64)])
        .unwrap();
    let b = interface
        .encode_function_call_data("setValue", &[Token::uint(2u64)])
        .unwrap();
    assert_eq!(a[..4], b[..4]);
    assert_ne!(&a[..4], &selector_from_signature("setValue(uint64)"));
}

#[test]
fn test_set_value_without_arguments() {
    let result = counter().encode_function_call_data("setValue", &[]);
    assert!(matches!(
        result,
        Err(AbiError::ArityMismatch {
            expected: 1,
            actual: 0
        })
    ));
}

#[test]
fn test_set_value_negative() {
    let result = counter().encode_function_call_data("setValue", &[Token::int(-12345i32)]);
    assert!(matches!(result, Err(AbiError::OutOfRange(_))));
}

#[test]
fn test_set_value_too_wide() {
    let result = counter().encode_function_call_data("setValue", &[Token::uint(1u64 << 32)]);
    assert!(matches!(result, Err(AbiError::OutOfRange(_))));
}

#[test]
fn test_unknown_function() {
    let result = counter().encode_function_call_data("doesNotExist", &[]);
    assert!(matches!(result, Err(AbiError::UnknownFunction(name)) if name == "doesNotExist"));
}

#[test]
fn test_getter_without_inputs() {
    let data = counter().encode_function_call_data("value", &[]).unwrap();
    assert_eq!(&data[..], &selector_from_signature("value()"));
}

// ==================== Constructor ====================

#[test]
fn test_constructor_call_data() {
    let data = counter()
        .encode_constructor_call_data(&[Token::uint(7u64)])
        .unwrap();
    let mut expected = vec![0u8; 31];
    expected.push(7);
    assert_eq!(&data[..], &expected[..]);
}

#[test]
fn test_missing_constructor() {
    let interface = Interface::from_json("[]").unwrap();
    assert!(matches!(
        interface.encode_constructor_call_data(&[]),
        Err(AbiError::MissingConstructor)
    ));
}

// ==================== Construction ====================

#[test]
fn test_missing_state_mutability_rejected() {
    let json = r#"[{"inputs": [], "name": "value", "type": "function"}]"#;
    assert!(matches!(Interface::from_json(json), Err(AbiError::Parse(_))));
}

#[test]
fn test_duplicate_signature_rejected() {
    let json = r#"[
        {"inputs": [], "name": "value", "stateMutability": "view", "type": "function"},
        {"inputs": [], "name": "value", "stateMutability": "pure", "type": "function"}
    ]"#;
    assert!(matches!(Interface::from_json(json), Err(AbiError::Parse(_))));
}

#[test]
fn test_duplicate_constructor_rejected() {
    let json = r#"[
        {"inputs": [], "stateMutability": "nonpayable", "type": "constructor"},
        {"inputs": [], "stateMutability": "payable", "type": "constructor"}
    ]"#;
    assert!(matches!(Interface::from_json(json), Err(AbiError::Parse(_))));
}

#[test]
fn test_overloads_keyed_by_signature() {
    let json = r#"[
        {
            "inputs": [{"name": "to", "type": "address"}],
            "name": "mint",
            "stateMutability": "nonpayable",
            "type": "function"
        },
        {
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint"}
            ],
            "name": "mint",
            "stateMutability": "nonpayable",
            "type": "function"
        }
    ]"#;
    let interface = Interface::from_json(json).unwrap();
    assert_eq!(interface.overloads("mint").count(), 2);

    let to = Token::Address(Address::from_bytes([0x42; 20]));
    let data = interface
        .encode_function_call_data("mint", &[to.clone(), Token::uint(5u64)])
        .unwrap();
    assert_eq!(&data[..4], &selector_from_signature("mint(address,uint256)"));

    let data = interface
        .encode_function_call_data("mint(address)", &[to.clone()])
        .unwrap();
    assert_eq!(&data[..4], &selector_from_signature("mint(address)"));

    // Shorthand and spacing resolve to the same canonical entry
    let data = interface
        .encode_function_call_data("mint(address, uint)", &[to, Token::uint(5u64)])
        .unwrap();
    assert_eq!(&data[..4], &selector_from_signature("mint(address,uint256)"));
}

#[test]
fn test_builder_matches_json() {
    let built = Interface::builder()
        .function(
            FunctionDef::function(
                "setValue",
                vec![Param::new("val", "uint32")],
                StateMutability::NonPayable,
            )
            .unwrap(),
        )
        .event(
            EventDef::new(
                "ValueSet",
                vec![EventParam {
                    param: Param::new("val", "uint32"),
                    indexed: false,
                }],
                false,
            )
            .unwrap(),
        )
        .build()
        .unwrap();

    let args = [Token::uint(12345u64)];
    assert_eq!(
        built.encode_function_call_data("setValue", &args).unwrap(),
        counter().encode_function_call_data("setValue", &args).unwrap()
    );
    assert_eq!(
        built.event("ValueSet").unwrap().signature(),
        "ValueSet(uint32)"
    );
}

#[test]
fn test_interface_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Interface>();
}
