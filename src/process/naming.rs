/// Convert a camelCase identifier to kebab-case, e.g. `allVeterans` -> `all-veterans`.
///
/// Each uppercase letter opens a new word. No hyphen is emitted at the start of
/// the output or directly after another hyphen.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::METRICS;

    #[test]
    fn converts_known_metrics() {
        assert_eq!(normalize("allVeterans"), "all-veterans");
        assert_eq!(normalize("peacetimeVeterans"), "peacetime-veterans");
        assert_eq!(normalize("koreanWar"), "korean-war");
        assert_eq!(normalize("vietnamWar"), "vietnam-war");
        assert_eq!(normalize("ww2"), "ww2");
    }

    #[test]
    fn leading_capital_and_existing_hyphen_get_no_extra_hyphen() {
        assert_eq!(normalize("AllVeterans"), "all-veterans");
        assert_eq!(normalize("gulf-War"), "gulf-war");
        assert_eq!(normalize("aBC"), "a-b-c");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn word_count_follows_capital_boundaries() {
        for metric in METRICS {
            let kebab = normalize(metric);
            let capitals = metric.chars().skip(1).filter(|c| c.is_uppercase()).count();
            assert_eq!(kebab.split('-').count(), capitals + 1, "{metric}");
            assert!(!kebab.chars().any(|c| c.is_uppercase()), "{metric}");
        }
    }
}
