use std::ops::Deref;

use serde::Deserialize;

/// A duration written as whitespace separated parts, e.g. `"1d 2h 3m 4s 500ms"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |out, part| {
                parse_part(part).and_then(|part| out.checked_add(part))
            })
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid duration: {s:?}")))
    }
}

fn parse_part(part: &str) -> Option<std::time::Duration> {
    let unit_start = part.find(|c: char| !c.is_ascii_digit())?;
    let (value, unit) = part.split_at(unit_start);
    let value = value.parse::<u64>().ok()?;
    let duration = match unit {
        "ms" => std::time::Duration::from_millis(value),
        "s" => std::time::Duration::from_secs(value),
        "m" => std::time::Duration::from_secs(value.checked_mul(60)?),
        "h" => std::time::Duration::from_secs(value.checked_mul(3600)?),
        "d" => std::time::Duration::from_secs(value.checked_mul(24 * 3600)?),
        _ => return None,
    };
    Some(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("13s", Some(13_000)),
            ("42m", Some(42 * 60_000)),
            ("7h", Some(7 * 60 * 60_000)),
            ("20d", Some(20 * 24 * 60 * 60_000)),
            ("220ms", Some(220)),
            ("", Some(0)),
            ("1d 2h 3m 4s 5ms", Some((((24 + 2) * 60 + 3) * 60 + 4) * 1000 + 5)),
            ("xyz", None),
            ("7dd", None),
            ("s", None),
            ("10", None),
            ("200000000000000d 200000000000000d", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input)
                .ok()
                .map(|x| x.0.as_millis() as u64);
            assert_eq!(output, expected);
        }
    }
}
