use std::path::Path;

/// Converts a function name to CamelCase.
///
/// Names with capitals are split before each capital (`registerHuman`
/// becomes `Register` `Human`), other names are split on underscores.
/// Each word is then capitalized.
pub fn to_camel_case(name: &str) -> String {
    if name.chars().any(char::is_uppercase) {
        let mut words = vec![];
        let mut current = String::new();
        for c in name.chars() {
            if c.is_uppercase() && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
        words.iter().map(|w| capitalize(w)).collect()
    } else {
        name.split('_').map(capitalize).collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn strategy_name(stem: &str) -> String {
    format!("{}Strategy", stem)
}

/// Action identifiers look like `circleshub_Trust`.
pub fn action_id(contract: &str, stem: &str) -> String {
    format!("{}_{}", contract.to_lowercase(), stem)
}

/// Contract name for an ABI file: the file stem, or the capitalized
/// parent directory when the file is named after an address (`0x...`).
pub fn contract_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if stem.starts_with("0x") {
        let parent = path.parent()?.file_name()?.to_str()?;
        Some(capitalize(parent))
    } else {
        Some(stem.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("registerHuman"), "RegisterHuman");
        assert_eq!(to_camel_case("safeTransferFrom"), "SafeTransferFrom");
        assert_eq!(to_camel_case("batchCall"), "BatchCall");
        assert_eq!(to_camel_case("transfer_from"), "TransferFrom");
        assert_eq!(to_camel_case("deposit"), "Deposit");
        assert_eq!(to_camel_case("setURI"), "SetURI");
        assert_eq!(to_camel_case("Trust"), "Trust");
    }

    #[test]
    fn test_action_id() {
        assert_eq!(action_id("CirclesHub", "Trust"), "circleshub_Trust");
        assert_eq!(strategy_name("Trust"), "TrustStrategy");
    }

    #[test]
    fn test_contract_name() {
        let p = PathBuf::from("abis/CirclesHub.json");
        assert_eq!(contract_name_from_path(&p).unwrap(), "CirclesHub");

        let p = PathBuf::from("abis/wxdai/0xe91d153e0b41518a2ce8dd3d7944fa863463a97d.json");
        assert_eq!(contract_name_from_path(&p).unwrap(), "Wxdai");
    }
}
