use std::sync::OnceLock;

use regex::Regex;

/// `${VAR}` or `${VAR:-default}`
const PLACEHOLDER: &str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}";

fn placeholder() -> anyhow::Result<&'static Regex> {
    static RE: OnceLock<Regex> = OnceLock::new();

    if let Some(re) = RE.get() {
        return Ok(re);
    }
    let re = Regex::new(PLACEHOLDER)?;
    Ok(RE.get_or_init(|| re))
}

/// Expand `${VAR}` and `${VAR:-default}` placeholders in raw TOML text
///
/// An unset variable without a default is an error naming the variable.
/// Lines starting with `#` are passed through unchanged.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    let re = placeholder()?;
    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut last_end = 0;
        for captures in re.captures_iter(line) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            output.push_str(&line[last_end..whole.start()]);

            match (std::env::var(name.as_str()), captures.get(2)) {
                (Ok(value), _) => output.push_str(&value),
                (Err(_), Some(default)) => output.push_str(default.as_str()),
                (Err(_), None) => anyhow::bail!("environment variable not set: `{}`", name.as_str()),
            }

            last_end = whole.end();
        }
        output.push_str(&line[last_end..]);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
