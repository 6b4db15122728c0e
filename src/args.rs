// Argument parsing for command arguments. Commands receive the raw tokens
// that follow their name; the ones that accept flags run them through
// `parse_args` to split positionals from `--flag value` pairs.

use std::collections::HashMap;

/// Marker that introduces a flag name.
const FLAG_PREFIX: &str = "--";

/// Value recorded for a flag that has no following value.
pub const FLAG_SET: &str = "true";

/// Result of splitting raw tokens into positionals and flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub params: Vec<String>,
    pub flags: HashMap<String, String>,
}

impl ParsedArgs {
    /// Shorthand for [`get_flag`] on this value's flags.
    pub fn flag<'a>(&'a self, name: &str, default: Option<&'a str>) -> Option<&'a str> {
        get_flag(&self.flags, name, default)
    }
}

/// Scan tokens left to right. A token starting with `--` names a flag; the
/// next token becomes its value unless it is empty or is itself a flag, in
/// which case the flag is recorded as `"true"`. Everything else is a
/// positional parameter. A repeated flag keeps its last value.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> ParsedArgs {
    let mut parsed = ParsedArgs::default();
    let mut i = 0;

    while i < args.len() {
        let token = args[i].as_ref();
        match token.strip_prefix(FLAG_PREFIX) {
            Some(name) => {
                let value = args
                    .get(i + 1)
                    .map(AsRef::as_ref)
                    .filter(|v| !v.is_empty() && !v.starts_with(FLAG_PREFIX));
                match value {
                    Some(v) => {
                        parsed.flags.insert(name.to_string(), v.to_string());
                        i += 2;
                    }
                    None => {
                        parsed.flags.insert(name.to_string(), FLAG_SET.to_string());
                        i += 1;
                    }
                }
            }
            None => {
                parsed.params.push(token.to_string());
                i += 1;
            }
        }
    }

    parsed
}

/// Look up a flag, falling back to `default` when it is absent or empty.
pub fn get_flag<'a>(
    flags: &'a HashMap<String, String>,
    name: &str,
    default: Option<&'a str>,
) -> Option<&'a str> {
    flags
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .or(default)
}
