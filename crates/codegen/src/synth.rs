use std::collections::{HashMap, HashSet};

use libcircles_core::{
    abi::{FunctionDescriptor, InputDescriptor},
    context::SimulationContext,
    strategy::{ParamValue, Params, Strategy},
    types::{Address, U256},
};
use libcircles_utils::log::{debug, warn};
use serde::Serialize;

use crate::{
    keys::{resolve_key, KeyRole},
    naming::{action_id, strategy_name, to_camel_case},
};

/// Where the value of a parameter comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotSource {
    TxSender,
    TxValue,
    /// Left empty for the caller to fill. `ty` is informational only.
    Placeholder { input: String, ty: String },
    /// A nested mapping with one slot per tuple component.
    Tuple {
        input: String,
        ty: String,
        fields: Vec<ParamSlot>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParamSlot {
    pub key: String,
    pub source: SlotSource,
}

impl ParamSlot {
    fn from_input(key: String, input: &InputDescriptor) -> Self {
        let source = if input.is_tuple() {
            SlotSource::Tuple {
                input: input.name.clone(),
                ty: input.ty.clone(),
                fields: input
                    .components
                    .iter()
                    .map(|c| ParamSlot::from_input(c.name.clone(), c))
                    .collect(),
            }
        } else {
            SlotSource::Placeholder {
                input: input.name.clone(),
                ty: input.ty.clone(),
            }
        };
        Self { key, source }
    }
}

/// The strategy generated for one non-view contract function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    /// Strategy name, e.g. `TransferStrategy`.
    pub name: String,
    /// CamelCase function name, with a numeric suffix for overloads.
    pub stem: String,
    pub function: String,
    pub signature: String,
    pub slots: Vec<ParamSlot>,
}

impl GeneratedUnit {
    pub fn keys(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.key.as_str()).collect()
    }

    pub fn action_id(&self, contract: &str) -> String {
        action_id(contract, &self.stem)
    }

    fn build(function: &FunctionDescriptor, stem: String) -> Self {
        let mut slots = vec![
            ParamSlot {
                key: resolve_key("", KeyRole::TxSender),
                source: SlotSource::TxSender,
            },
            ParamSlot {
                key: resolve_key("", KeyRole::TxValue),
                source: SlotSource::TxValue,
            },
        ];
        let mut used: HashSet<String> =
            slots.iter().map(|s| s.key.clone()).collect();
        for input in &function.inputs {
            let mut key = resolve_key(&input.name, KeyRole::Input);
            while used.contains(&key) {
                warn!(
                    function = function.name.as_str(),
                    key = key.as_str(),
                    "parameter key collision, appending underscore"
                );
                key.push('_');
            }
            used.insert(key.clone());
            slots.push(ParamSlot::from_input(key, input));
        }
        Self {
            name: strategy_name(&stem),
            stem,
            function: function.name.clone(),
            signature: function.signature(),
            slots,
        }
    }
}

fn render(slots: &[ParamSlot], sender: Address) -> Params {
    slots
        .iter()
        .map(|slot| {
            let value = match &slot.source {
                SlotSource::TxSender => ParamValue::Address(sender),
                SlotSource::TxValue => ParamValue::Uint(U256::ZERO),
                SlotSource::Placeholder { .. } => ParamValue::Null,
                SlotSource::Tuple { fields, .. } => {
                    ParamValue::Map(render(fields, sender))
                }
            };
            (slot.key.clone(), value)
        })
        .collect()
}

impl Strategy for GeneratedUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_params(&self, context: &dyn SimulationContext) -> Option<Params> {
        let sender = context.get_sender()?;
        Some(render(&self.slots, sender))
    }
}

/// Generates one unit per non-view function, in input order.
///
/// Overloads of the same function get a numeric suffix starting at 2,
/// so `safeTransferFrom` overloads become `SafeTransferFrom` and
/// `SafeTransferFrom2`. The suffix is bumped past any stem already taken,
/// including one that a differently named function produced.
pub fn synthesize(functions: &[FunctionDescriptor]) -> Vec<GeneratedUnit> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut units = vec![];
    for function in functions {
        if function.is_view {
            debug!(function = function.name.as_str(), "skip view function");
            continue;
        }
        let base = to_camel_case(&function.name);
        let count = seen.entry(base.clone()).or_default();
        *count += 1;
        let mut stem = if *count == 1 {
            base.clone()
        } else {
            format!("{}{}", base, count)
        };
        while taken.contains(&stem) {
            *count += 1;
            let next = format!("{}{}", base, count);
            warn!(
                function = function.name.as_str(),
                stem = stem.as_str(),
                next = next.as_str(),
                "strategy name taken, bumping suffix"
            );
            stem = next;
        }
        taken.insert(stem.clone());
        units.push(GeneratedUnit::build(function, stem));
    }
    units
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use libcircles_core::{
        abi::{FunctionDescriptor, InputDescriptor},
        context::MockSimulationContext,
        strategy::{ParamValue, Strategy},
        types::{Address, U256},
    };

    use super::*;

    fn sender() -> Address {
        Address::repeat_byte(0x11)
    }

    fn context_with_sender() -> MockSimulationContext {
        let mut ctx = MockSimulationContext::new();
        ctx.expect_get_sender().returning(|| Some(sender()));
        ctx
    }

    fn transfer() -> FunctionDescriptor {
        FunctionDescriptor::new(
            "transfer",
            false,
            vec![
                InputDescriptor::new("to", "address"),
                InputDescriptor::new("value", "uint256"),
            ],
        )
    }

    #[test]
    fn test_transfer_keys() {
        let units = synthesize(&[transfer()]);
        assert_eq!(units.len(), 1);
        let unit = &units[0];
        assert_eq!(unit.name, "TransferStrategy");
        assert_eq!(unit.keys(), vec!["sender", "value", "to_", "amount_value"]);

        let params = unit.get_params(&context_with_sender()).unwrap();
        assert_eq!(params["sender"], ParamValue::Address(sender()));
        assert_eq!(params["value"], ParamValue::Uint(U256::ZERO));
        assert!(params["to_"].is_null());
        assert!(params["amount_value"].is_null());
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_view_function_skipped() {
        let balance_of = FunctionDescriptor::new(
            "balanceOf",
            true,
            vec![InputDescriptor::new("owner", "address")],
        );
        let units = synthesize(&[balance_of, transfer()]);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].function, "transfer");
    }

    #[test]
    fn test_no_inputs() {
        let units = synthesize(&[FunctionDescriptor::new("stop", false, vec![])]);
        assert_eq!(units[0].keys(), vec!["sender", "value"]);
        let params = units[0].get_params(&context_with_sender()).unwrap();
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_keys_are_unique() {
        let f = FunctionDescriptor::new(
            "weird",
            false,
            vec![
                InputDescriptor::new("sender", "address"),
                InputDescriptor::new("value", "uint256"),
                InputDescriptor::new("class", "uint8"),
                InputDescriptor::new("sender_account", "address"),
                InputDescriptor::new("class_", "uint8"),
            ],
        );
        let unit = &synthesize(&[f])[0];
        let keys = unit.keys();
        assert_eq!(
            keys,
            vec![
                "sender",
                "value",
                "sender_account",
                "amount_value",
                "class_",
                "sender_account_",
                "class__",
            ]
        );
        let distinct: BTreeSet<_> = keys.iter().collect();
        assert_eq!(distinct.len(), keys.len());
    }

    #[test]
    fn test_tuple_input() {
        let f = FunctionDescriptor::new(
            "operateFlowMatrix",
            false,
            vec![
                InputDescriptor::tuple(
                    "flow",
                    vec![
                        InputDescriptor::new("streamSinkId", "uint16"),
                        InputDescriptor::new("amount", "uint192"),
                        InputDescriptor::tuple(
                            "coordinates",
                            vec![InputDescriptor::new("from", "uint16")],
                        ),
                    ],
                ),
                InputDescriptor::new("flowVertices", "address[]"),
            ],
        );
        let unit = &synthesize(&[f])[0];
        assert_eq!(unit.name, "OperateFlowMatrixStrategy");
        assert_eq!(unit.keys(), vec!["sender", "value", "flow", "flowVertices"]);

        let params = unit.get_params(&context_with_sender()).unwrap();
        let flow = params["flow"].as_map().unwrap();
        let flow_keys: Vec<_> = flow.keys().map(String::as_str).collect();
        assert_eq!(flow_keys, vec!["streamSinkId", "amount", "coordinates"]);
        assert!(flow["amount"].is_null());

        let coordinates = flow["coordinates"].as_map().unwrap();
        assert_eq!(coordinates.len(), 1);
        assert!(coordinates["from"].is_null());

        assert!(params["flowVertices"].is_null());
    }

    #[test]
    fn test_tuple_array_is_placeholder() {
        let mut calls = InputDescriptor::tuple(
            "calls",
            vec![InputDescriptor::new("target", "address")],
        );
        calls.ty.push_str("[]");
        let f = FunctionDescriptor::new("batchCall", false, vec![calls]);
        let unit = &synthesize(&[f])[0];
        let params = unit.get_params(&context_with_sender()).unwrap();
        assert!(params["calls"].is_null());
    }

    #[test]
    fn test_no_sender_skips() {
        let mut ctx = MockSimulationContext::new();
        ctx.expect_get_sender().times(1).returning(|| None);
        let unit = &synthesize(&[transfer()])[0];
        assert_eq!(unit.get_params(&ctx), None);
    }

    #[test]
    fn test_overloads_get_suffix() {
        let one = FunctionDescriptor::new(
            "safeTransferFrom",
            false,
            vec![InputDescriptor::new("id", "uint256")],
        );
        let two = FunctionDescriptor::new(
            "safeTransferFrom",
            false,
            vec![
                InputDescriptor::new("id", "uint256"),
                InputDescriptor::new("data", "bytes"),
            ],
        );
        let units = synthesize(&[one, two]);
        assert_eq!(units[0].name, "SafeTransferFromStrategy");
        assert_eq!(units[1].name, "SafeTransferFrom2Strategy");
        assert_eq!(
            units[1].action_id("CirclesHub"),
            "circleshub_SafeTransferFrom2"
        );
    }

    #[test]
    fn test_overload_suffix_skips_taken_names() {
        let units = synthesize(&[
            FunctionDescriptor::new("mint", false, vec![]),
            FunctionDescriptor::new(
                "mint",
                false,
                vec![InputDescriptor::new("id", "uint256")],
            ),
            FunctionDescriptor::new("mint2", false, vec![]),
            FunctionDescriptor::new(
                "mint",
                false,
                vec![InputDescriptor::new("to", "address")],
            ),
        ]);
        let names: Vec<_> = units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "MintStrategy",
                "Mint2Strategy",
                "Mint22Strategy",
                "Mint3Strategy",
            ]
        );
        let distinct: BTreeSet<_> = names.iter().collect();
        assert_eq!(distinct.len(), names.len());
        assert_eq!(units[2].function, "mint2");
    }
}
