use argord::{Error, Item, OptDescr, Parser, Result};

/// Drives `args` to the first error and returns it together with the number
/// of items produced before it.
fn first_error<S: AsRef<str>>(args: &[S], descrs: &[OptDescr]) -> (Error, usize) {
    let mut parser = Parser::new(args, descrs);
    let mut produced = 0;

    loop {
        match parser.next_item() {
            Ok(Some(_)) => produced += 1,
            Ok(None) => panic!("expected an error"),
            Err(err) => return (err, produced),
        }
    }
}

#[test]
fn unknown_short_option_space_form() {
    let descrs = [OptDescr::new(0, Some('d'), None, true)];
    let (err, produced) = first_error(&["-d", "salut", "-e", "-d", "meow"], &descrs);

    assert_eq!(err.orig_index(), 2);
    assert_eq!(err.orig_arg(), "-e");
    assert_eq!(err.unknown_opt_name(), Some("-e"));
    assert_eq!(err.opt_descr(), None);
    assert_eq!(produced, 1);
}

#[test]
fn unknown_short_option_after_glued_form() {
    let descrs = [OptDescr::new(0, Some('d'), None, true)];
    let (err, _) = first_error(&["-dsalut", "-e", "-d", "meow"], &descrs);

    assert_eq!(err.orig_index(), 1);
    assert_eq!(err.unknown_opt_name(), Some("-e"));
}

#[test]
fn unknown_long_option_space_form() {
    let descrs = [OptDescr::new(0, None, Some("sink"), true)];
    let (err, _) = first_error(&["--sink", "party", "--food", "--sink", "impulse"], &descrs);

    assert_eq!(err.orig_index(), 2);
    assert_eq!(err.unknown_opt_name(), Some("--food"));
}

#[test]
fn unknown_long_option_equal_form_reports_name_only() {
    let descrs = [OptDescr::new(0, None, Some("sink"), true)];
    let (err, _) = first_error(&["--sink=party", "--food=18", "--sink=impulse"], &descrs);

    assert_eq!(err.orig_index(), 1);
    assert_eq!(err.orig_arg(), "--food=18");

    // Only the part before the `=` names the option.
    assert_eq!(err.unknown_opt_name(), Some("--food"));
}

#[test]
fn unknown_option_after_non_option() {
    let descrs = [OptDescr::new(0, None, Some("thumb"), true)];
    let (err, produced) = first_error(&["--thumb=party", "wound", "--food"], &descrs);

    assert_eq!(err.orig_index(), 2);
    assert_eq!(err.unknown_opt_name(), Some("--food"));
    assert_eq!(produced, 2);
}

#[test]
fn missing_long_option_value() {
    let descrs = [OptDescr::new(0, None, Some("thumb"), true)];
    let (err, produced) = first_error(&["allo", "--thumb"], &descrs);

    assert_eq!(err.orig_index(), 1);
    assert_eq!(err.orig_arg(), "--thumb");
    let (descr, is_short) = err.opt_descr().unwrap();
    assert_eq!(descr, &descrs[0]);
    assert!(!is_short);
    assert_eq!(produced, 1);
}

#[test]
fn missing_long_option_value_alone() {
    let descrs = [OptDescr::new(0, None, Some("thumb"), true)];
    let (err, produced) = first_error(&["--thumb"], &descrs);

    assert_eq!(err.orig_index(), 0);
    assert_eq!(produced, 0);
}

#[test]
fn missing_short_option_value() {
    let descrs = [OptDescr::new(0, Some('k'), None, true)];
    let (err, _) = first_error(&["zoom", "heille", "-k"], &descrs);

    assert_eq!(err.orig_index(), 2);
    let (descr, is_short) = err.opt_descr().unwrap();
    assert_eq!(descr, &descrs[0]);
    assert!(is_short);
}

#[test]
fn missing_value_at_end_of_cluster() {
    let descrs = [
        OptDescr::new(0, Some('a'), None, false),
        OptDescr::new(1, Some('b'), None, false),
        OptDescr::new(2, Some('c'), None, true),
    ];
    let (err, produced) = first_error(&["-abc"], &descrs);

    // `a` and `b` came out fine; `c` has nothing glued and no next argument.
    assert_eq!(produced, 2);
    assert_eq!(err.orig_index(), 0);
    assert_eq!(err.orig_arg(), "-abc");
    let (descr, is_short) = err.opt_descr().unwrap();
    assert_eq!(descr, &descrs[2]);
    assert!(is_short);
}

#[test]
fn unexpected_long_option_value() {
    let descrs = [OptDescr::new(0, Some('c'), Some("chevre"), false)];
    let (err, produced) = first_error(&["ambulance", "--chevre=fromage", "tar"], &descrs);

    assert_eq!(err.orig_index(), 1);
    assert_eq!(err.orig_arg(), "--chevre=fromage");
    let (descr, is_short) = err.opt_descr().unwrap();
    assert_eq!(descr, &descrs[0]);
    assert!(!is_short);
    assert_eq!(produced, 1);
}

#[test]
fn error_display_strings() {
    let descrs = [
        OptDescr::new(0, None, Some("thumb"), true),
        OptDescr::new(1, Some('k'), None, true),
        OptDescr::new(2, None, Some("chevre"), false),
    ];

    let (err, _) = first_error(&["--sink"], &descrs);
    assert_eq!(
        err.to_string(),
        "While parsing argument #1 (`--sink`): Unknown option `--sink`"
    );

    let (err, _) = first_error(&["allo", "--thumb"], &descrs);
    assert_eq!(
        err.to_string(),
        "While parsing argument #2 (`--thumb`): Missing required argument for option `--thumb`"
    );

    let (err, _) = first_error(&["-k"], &descrs);
    assert_eq!(
        err.to_string(),
        "While parsing argument #1 (`-k`): Missing required argument for option `-k`"
    );

    let (err, _) = first_error(&["--chevre=fromage"], &descrs);
    assert_eq!(
        err.to_string(),
        "While parsing argument #1 (`--chevre=fromage`): Unexpected argument for option `--chevre`"
    );
}

// ── poisoning ──────────────────────────────────────────────────────────────

#[test]
fn poisoned_parser_stays_put() {
    let descrs = [OptDescr::new(0, Some('d'), None, false)];
    let args = ["-d", "--nope", "rest"];
    let mut parser = Parser::new(&args, &descrs);

    assert!(!parser.is_poisoned());
    parser.next_item().unwrap();
    assert!(parser.next_item().is_err());
    assert!(parser.is_poisoned());

    // Frozen where the error was detected; later calls yield nothing.
    assert_eq!(parser.ingested_orig_args(), 1);
    assert_eq!(parser.next_item().unwrap(), None);
    assert_eq!(parser.next_item().unwrap(), None);
    assert_eq!(parser.ingested_orig_args(), 1);
}

#[test]
fn iterator_fuses_after_error() {
    let descrs = [OptDescr::new(0, Some('d'), None, false)];
    let args = ["-d", "--nope", "rest"];

    let collected: Vec<Result<Item>> = Parser::new(&args, &descrs).collect();

    assert_eq!(collected.len(), 2);
    assert!(collected[0].is_ok());
    assert!(collected[1].is_err());
}
