use libcircles_core::error::CirclesError;
use serde::Serialize;

use crate::synth::{GeneratedUnit, ParamSlot};

use super::Emitter;

/// Emits the generated units as JSON, for tooling that renders its own
/// sources or for inspection.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManifestEmitter;

#[derive(Serialize)]
struct Manifest<'a> {
    contract: &'a str,
    units: Vec<UnitEntry<'a>>,
}

#[derive(Serialize)]
struct UnitEntry<'a> {
    name: &'a str,
    action: String,
    function: &'a str,
    signature: &'a str,
    keys: Vec<&'a str>,
    slots: &'a [ParamSlot],
}

impl Emitter for ManifestEmitter {
    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn emit(
        &self,
        contract: &str,
        units: &[GeneratedUnit],
    ) -> Result<String, CirclesError> {
        let manifest = Manifest {
            contract,
            units: units
                .iter()
                .map(|u| UnitEntry {
                    name: &u.name,
                    action: u.action_id(contract),
                    function: &u.function,
                    signature: &u.signature,
                    keys: u.keys(),
                    slots: &u.slots,
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&manifest)?)
    }
}

#[cfg(test)]
mod tests {
    use libcircles_core::abi::{FunctionDescriptor, InputDescriptor};

    use crate::synth::synthesize;

    use super::*;

    #[test]
    fn test_manifest() {
        let units = synthesize(&[FunctionDescriptor::new(
            "trust",
            false,
            vec![
                InputDescriptor::new("_trustReceiver", "address"),
                InputDescriptor::new("_expiry", "uint96"),
            ],
        )]);
        let out = ManifestEmitter.emit("CirclesHub", &units).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["contract"], "CirclesHub");
        let unit = &json["units"][0];
        assert_eq!(unit["name"], "TrustStrategy");
        assert_eq!(unit["action"], "circleshub_Trust");
        assert_eq!(
            unit["keys"],
            serde_json::json!(["sender", "value", "_trustReceiver", "_expiry"])
        );
        assert_eq!(unit["slots"][0]["source"]["kind"], "tx_sender");
        assert_eq!(unit["slots"][3]["source"]["ty"], "uint96");
    }
}
