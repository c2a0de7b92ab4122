#![allow(missing_docs)]

use std::hint::black_box;

use calldata_abi::{encode, parse_type, Interface, ParamType, Token};
use calldata_primitives::Address;
use criterion::{criterion_group, criterion_main, Criterion};

const ERC20_ABI: &str = r#"[
    {
        "type": "function",
        "name": "transfer",
        "inputs": [
            {"name": "to", "type": "address"},
            {"name": "amount", "type": "uint256"}
        ],
        "stateMutability": "nonpayable"
    },
    {
        "type": "function",
        "name": "batchTransfer",
        "inputs": [
            {"name": "to", "type": "address[]"},
            {"name": "amounts", "type": "uint256[]"},
            {"name": "memo", "type": "string"}
        ],
        "stateMutability": "nonpayable"
    }
]"#;

fn encode_values(c: &mut Criterion) {
    let mut g = c.benchmark_group("encode");

    g.bench_function("word", |b| {
        let types = [ParamType::Uint(256)];
        let tokens = [Token::uint(u64::MAX)];
        b.iter(|| encode(black_box(&types), black_box(&tokens)).unwrap());
    });

    g.bench_function("dynamic", |b| {
        let types = [
            parse_type("string").unwrap(),
            parse_type("uint32[]").unwrap(),
            parse_type("bytes").unwrap(),
        ];
        let tokens = [
            Token::string("Hello, world!".repeat(8)),
            Token::Array((0..32u64).map(Token::uint).collect()),
            Token::bytes(vec![0xab; 200]),
        ];
        b.iter(|| encode(black_box(&types), black_box(&tokens)).unwrap());
    });

    g.finish();
}

fn call_data(c: &mut Criterion) {
    let mut g = c.benchmark_group("interface");
    let interface = Interface::from_json(ERC20_ABI).unwrap();
    let to = Token::Address(Address::from_bytes([0x42; 20]));

    g.bench_function("parse_json", |b| {
        b.iter(|| Interface::from_json(black_box(ERC20_ABI)).unwrap());
    });

    g.bench_function("transfer", |b| {
        let args = [to.clone(), Token::uint(1_000_000u64)];
        b.iter(|| {
            interface
                .encode_function_call_data("transfer", black_box(&args))
                .unwrap()
        });
    });

    g.bench_function("batch_transfer", |b| {
        let args = [
            Token::Array(vec![to.clone(); 16]),
            Token::Array((0..16u64).map(Token::uint).collect()),
            Token::string("payroll"),
        ];
        b.iter(|| {
            interface
                .encode_function_call_data("batchTransfer", black_box(&args))
                .unwrap()
        });
    });

    g.finish();
}

criterion_group!(benches, encode_values, call_data);
criterion_main!(benches);
