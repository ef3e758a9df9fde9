use std::path::PathBuf;

use vmasm::{
    asm_to_code,
    config::{Config, Redefinition},
    emit, Error, Translator,
};

fn temp(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vmasm-{}-{}", std::process::id(), name))
}

fn lines(code: &str) -> Vec<String> {
    code.lines().map(|l| l.to_string()).collect()
}

fn translate(code: &str) -> String {
    let output = Translator::new(Config::default())
        .translate("main.asm", &lines(code))
        .unwrap();
    let text = emit::render(&output.code);
    println!("{}", text);
    text
}

fn assert(code: &str, expect: &str) {
    assert_eq!(translate(code), expect);
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert($code, $expect);
        }
    };
}

case!(
    end_jumps_to_start,
    "start\nread a\nend",
    "k 42 a\nk 0 0\n"
);

case!(
    start_after_setup,
    "read a\nread b\nstart\nprint a\nend",
    "k 42 a\nk 42 b\nk 20 a\nk 0 4\n"
);

case!(
    comments_and_blank_lines,
    "# program\n\nstart   # entry\n  read a # input\n\nend",
    "k 42 a\nk 0 0\n"
);

case!(
    variable_block,
    "uint x 5\nprint x\nend",
    "k 1 3 4\nu 5\nk 20 2\nk 0 0\n"
);

case!(
    variable_block_of_three,
    "start\nuint a 1\nint b -2\nfloat c 0.5\nadd a, b\nend",
    "k 1 3 8\nu 1\ni -2\nf 0.5\nk 29 2 4\nk 0 0\n"
);

case!(
    two_variable_blocks,
    "uint a 1\nread a\nuint b 2\nprint b\nend",
    "k 1 3 4\nu 1\nk 42 2\nk 1 3 10\nu 2\nk 20 8\nk 0 0\n"
);

case!(
    forward_reference,
    "start\njmp done\nread a\ndone:\nend",
    "k 1 0 4\nk 42 a\nk 0 0\n"
);

case!(
    backward_reference,
    "start\nloop:\nread a\njne loop",
    "k 42 a\nk 11 0 0\n"
);

case!(
    procedure,
    "start\ncall twice\nend\nproc twice\ninc a\nendp",
    "k 51 4\nk 0 0\nk 40 a\nk 54\n"
);

case!(
    constant_expressions,
    "start\nload a (2+3)*4\nsetf -(10%4)\nend",
    "k 23 a 20\nk 53 -2\nk 0 0\n"
);

case!(
    label_line_drops_rest,
    "start\nmain: read a\nend",
    "k 0 0\n"
);

case!(
    unknown_names_are_kept,
    "start\nprint missing\nend",
    "k 20 missing\nk 0 0\n"
);

#[test]
fn variable_address_moves_past_jump() {
    let output = Translator::new(Config::default())
        .translate("main.asm", &lines("read a\nuint x 5\nprint x"))
        .unwrap();
    // x was first recorded at 2, where the jump now sits.
    assert_eq!(output.program.symbols.get_val("x"), Some(4));
    assert_eq!(output.code[1], vec!["k", "1", "3", "6"]);
}

#[test]
fn redefinition_last_write_wins() {
    assert(
        "start\nl:\nread a\nl:\njmp l",
        "k 42 a\nk 1 0 2\n",
    );
}

#[test]
fn redefinition_warn_and_error() {
    let code = lines("start\nl:\nread a\nl:\njmp l");

    let warn = Config {
        redefinition: Redefinition::Warn,
        ..Config::default()
    };
    let output = Translator::new(warn).translate("main.asm", &code).unwrap();
    assert_eq!(output.program.diags.len(), 2);
    assert_eq!(output.program.diags[0].line_idx, 3);

    let err = Translator::new(Config::strict())
        .translate("main.asm", &code)
        .unwrap_err();
    assert!(matches!(err.kind(), Error::RedefinedSymbol(name) if name == "l"));
    assert_eq!(err.location(), Some(("main.asm", 3)));
}

fn strict_rejects(code: &str, token: &str) {
    let err = Translator::new(Config::strict())
        .translate("main.asm", &lines(code))
        .unwrap_err();
    println!("{}", err.kind());
    assert!(matches!(err.kind(), Error::UndefinedSymbol(name) if name == token));
    assert_eq!(err.location(), Some(("main.asm", 1)));
}

#[test]
fn strict_rejects_non_numeric_tokens() {
    strict_rejects("start\nprint _tmp\nend", "_tmp");
    strict_rejects("start\nprint #b\nend", "#b");
    strict_rejects("start\nprint $x\nend", "$x");
    strict_rejects("start\nuint n missing\nprint n", "missing");
}

#[test]
fn bad_expression_fails_translation() {
    let err = Translator::new(Config::default())
        .translate("main.asm", &lines("start\nload a 1+*2\nend"))
        .unwrap_err();
    assert_eq!(err.location(), Some(("main.asm", 1)));
    assert!(matches!(err.kind(), Error::Expr { .. }));
}

#[test]
fn translation_is_repeatable() {
    let source = temp("repeat.asm");
    let first = temp("repeat-1.txt");
    let second = temp("repeat-2.txt");
    std::fs::write(&source, "read a\nstart\nloop:\nprint a\njmp loop\nend\n").unwrap();

    for target in [&first, &second] {
        asm_to_code(
            source.to_str().unwrap(),
            target.to_str().unwrap(),
            Config::default(),
        )
        .unwrap();
    }
    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(&second).unwrap();
    assert_eq!(a, b);
    assert_eq!(String::from_utf8(a).unwrap(), "k 42 a\nk 20 a\nk 1 0 2\nk 0 2\n");

    for path in [&source, &first, &second] {
        std::fs::remove_file(path).unwrap();
    }
}

#[test]
fn unreadable_source() {
    let source = temp("missing.asm");
    let target = temp("missing.txt");
    let err = asm_to_code(
        source.to_str().unwrap(),
        target.to_str().unwrap(),
        Config::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::SourceOpen(..)));
    assert!(!target.exists());
}

#[test]
fn failed_translation_writes_nothing() {
    let source = temp("divzero.asm");
    let target = temp("divzero.txt");
    std::fs::write(&source, "start\nload a 1/0\nend\n").unwrap();
    assert!(asm_to_code(
        source.to_str().unwrap(),
        target.to_str().unwrap(),
        Config::default(),
    )
    .is_err());
    assert!(!target.exists());
    std::fs::remove_file(&source).unwrap();
}
