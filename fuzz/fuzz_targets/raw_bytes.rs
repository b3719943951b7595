#![no_main]

use argord::{Item, OptDescr, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let descrs = [
        OptDescr::new(0, Some('x'), Some("long"), false),
        OptDescr::new(1, Some('v'), Some("value"), true),
    ];

    let text = String::from_utf8_lossy(data);
    let args: Vec<&str> = text.split('\0').collect();

    let mut parser = Parser::new(&args, &descrs);
    let mut last_orig_index = None;
    let mut non_opt_count = 0;

    loop {
        match parser.next_item() {
            Ok(Some(Item::NonOpt {
                orig_index,
                non_opt_index,
                ..
            })) => {
                assert!(last_orig_index.map_or(true, |last| orig_index > last));
                last_orig_index = Some(orig_index);

                assert_eq!(non_opt_index, non_opt_count);
                non_opt_count += 1;
            }
            Ok(Some(Item::Opt { .. })) => {}
            Ok(None) => break,
            Err(_) => {
                assert!(parser.is_poisoned());
                break;
            }
        }
    }
});
