use libcircles_core::error::CirclesError;

use crate::{
    config::CodegenConfig,
    synth::{GeneratedUnit, ParamSlot, SlotSource},
};

use super::Emitter;

const INDENT: &str = "    ";

/// Emits a Python module with one `BaseStrategy` subclass per unit.
#[derive(Clone, Debug)]
pub struct PythonEmitter {
    pub base_strategy_module: String,
    pub context_module: String,
}

impl From<&CodegenConfig> for PythonEmitter {
    fn from(cfg: &CodegenConfig) -> Self {
        Self {
            base_strategy_module: cfg.base_strategy_module.clone(),
            context_module: cfg.context_module.clone(),
        }
    }
}

impl Default for PythonEmitter {
    fn default() -> Self {
        Self::from(&CodegenConfig::default())
    }
}

impl PythonEmitter {
    fn header(&self, contract: &str) -> Vec<String> {
        vec![
            format!("\"\"\"Strategies for {}. Generated, do not edit.\"\"\"", contract),
            "from typing import Any, Dict, Optional".to_string(),
            String::new(),
            format!("from {} import BaseStrategy", self.base_strategy_module),
            format!("from {} import SimulationContext", self.context_module),
        ]
    }

    fn unit(&self, unit: &GeneratedUnit) -> Vec<String> {
        let mut lines = vec![
            format!("class {}(BaseStrategy):", unit.name),
            format!("{}\"\"\"{}\"\"\"", INDENT, unit.signature),
            String::new(),
            format!(
                "{}def get_params(self, context: SimulationContext) -> Optional[Dict[str, Any]]:",
                INDENT
            ),
        ];
        let body = INDENT.repeat(2);
        lines.push(format!("{}sender = self.get_sender(context)", body));
        lines.push(format!("{}if not sender:", body));
        lines.push(format!("{}{}return None", body, INDENT));
        lines.push(String::new());
        lines.push(format!("{}params = {{", body));
        slot_lines(&unit.slots, 3, &mut lines);
        lines.push(format!("{}}}", body));
        lines.push(String::new());
        lines.push(format!("{}return params", body));
        lines
    }
}

fn slot_lines(slots: &[ParamSlot], depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    for slot in slots {
        match &slot.source {
            SlotSource::TxSender => {
                lines.push(format!("{}'{}': sender,", indent, slot.key))
            }
            SlotSource::TxValue => {
                lines.push(format!("{}'{}': 0,", indent, slot.key))
            }
            SlotSource::Placeholder { ty, .. } => lines.push(format!(
                "{}'{}': None,  # {}",
                indent, slot.key, ty
            )),
            SlotSource::Tuple { ty, fields, .. } => {
                lines.push(format!("{}'{}': {{  # {}", indent, slot.key, ty));
                slot_lines(fields, depth + 1, lines);
                lines.push(format!("{}}},", indent));
            }
        }
    }
}

impl Emitter for PythonEmitter {
    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn emit(
        &self,
        contract: &str,
        units: &[GeneratedUnit],
    ) -> Result<String, CirclesError> {
        let mut lines = self.header(contract);
        for unit in units {
            lines.push(String::new());
            lines.push(String::new());
            lines.extend(self.unit(unit));
        }
        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use libcircles_core::abi::{FunctionDescriptor, InputDescriptor};

    use crate::synth::synthesize;

    use super::*;

    #[test]
    fn test_emit_transfer() {
        let units = synthesize(&[FunctionDescriptor::new(
            "transfer",
            false,
            vec![
                InputDescriptor::new("to", "address"),
                InputDescriptor::new("value", "uint256"),
            ],
        )]);
        let src = PythonEmitter::default().emit("WXDAI", &units).unwrap();
        let expected = r#"
class TransferStrategy(BaseStrategy):
    """transfer(address,uint256)"""

    def get_params(self, context: SimulationContext) -> Optional[Dict[str, Any]]:
        sender = self.get_sender(context)
        if not sender:
            return None

        params = {
            'sender': sender,
            'value': 0,
            'to_': None,  # address
            'amount_value': None,  # uint256
        }

        return params
"#;
        assert!(src.starts_with("\"\"\"Strategies for WXDAI."));
        assert!(src.contains(expected), "{}", src);
    }

    #[test]
    fn test_emit_nested_tuple() {
        let units = synthesize(&[FunctionDescriptor::new(
            "registerGroup",
            false,
            vec![InputDescriptor::tuple(
                "group",
                vec![
                    InputDescriptor::new("mint", "address"),
                    InputDescriptor::new("name", "string"),
                ],
            )],
        )]);
        let src = PythonEmitter::default().emit("CirclesHub", &units).unwrap();
        let expected = r#"
            'group': {  # tuple(address,string)
                'mint': None,  # address
                'name': None,  # string
            },
"#;
        assert!(src.contains(expected), "{}", src);
    }

    #[test]
    fn test_one_class_per_unit() {
        let units = synthesize(&[
            FunctionDescriptor::new("deposit", false, vec![]),
            FunctionDescriptor::new("totalSupply", true, vec![]),
            FunctionDescriptor::new(
                "withdraw",
                false,
                vec![InputDescriptor::new("wad", "uint256")],
            ),
        ]);
        let emitter = PythonEmitter {
            base_strategy_module: "strategies.base".to_string(),
            context_module: "sim.context".to_string(),
        };
        let src = emitter.emit("WXDAI", &units).unwrap();
        assert_eq!(src.matches("(BaseStrategy):").count(), 2);
        assert!(src.contains("from strategies.base import BaseStrategy"));
        assert!(src.contains("from sim.context import SimulationContext"));
        assert!(!src.contains("TotalSupply"));
    }
}
