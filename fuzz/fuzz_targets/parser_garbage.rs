#![no_main]

use argord::{parse_all, OptDescr, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let descrs = [
        OptDescr::new(0, Some('a'), Some("alpha"), false),
        OptDescr::new(1, Some('b'), Some("beta"), true),
        OptDescr::new(2, Some('='), None, true),
        OptDescr::new(3, None, Some(""), true),
    ];

    let mut args: Vec<String> = Vec::new();

    for &byte in data {
        args.push(format!("{}", byte));
        args.push(format!("{}", byte as char));
        args.push(format!("-{}", byte as char));
        args.push(format!("--{}", byte as char));
        args.push(format!("--{}={}", byte as char, byte));
        args.push(format!("-a{}b", byte as char));
    }

    let mut parser = Parser::new(&args, &descrs);
    while let Ok(Some(_)) = parser.next_item() {}
    assert!(parser.ingested_orig_args() <= args.len());

    let _ = parse_all(&args, &descrs, false);
});
