use std::sync::OnceLock;

use regex::Regex;

const NAME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_]*";
const DEFINED_OP_PATTERN: &str = r"^\.[A-Za-z]+\.";

fn name_regex() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new(NAME_PATTERN).expect("name pattern compiles"))
}

fn defined_op_regex() -> &'static Regex {
    static DEFINED_OP: OnceLock<Regex> = OnceLock::new();
    DEFINED_OP.get_or_init(|| Regex::new(DEFINED_OP_PATTERN).expect("operator pattern compiles"))
}

pub(crate) fn leading_name(input: &str) -> Option<&str> {
    name_regex().find(input).map(|found| found.as_str())
}

pub(crate) fn leading_defined_op(input: &str) -> Option<&str> {
    defined_op_regex().find(input).map(|found| found.as_str())
}
