use std::collections::HashMap;

use convey::regex::Regex;
use convey::{Convert, convert_strict};

#[derive(Convert)]
#[convey(no_zero, display)]
struct Rule {
    pattern: Regex,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.pattern.as_str())
    }
}

fn main() {
    let mut rule = Rule {
        pattern: Regex::new("a").unwrap(),
    };
    let _ = convert_strict(&HashMap::from([("pattern", "b+")]), &mut rule);
    let mut text = String::new();
    let _ = convert_strict(&rule, &mut text);
}
