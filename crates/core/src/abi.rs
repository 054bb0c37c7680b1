use alloy_json_abi::{Function, Param, StateMutability};
use serde::{Deserialize, Serialize};

/// One declared input of a contract function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDescriptor {
    pub name: String,

    /// Scalar type name (`address`, `uint256[]`, ...) or
    /// `tuple(<component types>)`, possibly followed by array suffixes.
    #[serde(rename = "type")]
    pub ty: String,

    /// Tuple fields, in declaration order. Empty for non-tuple types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<InputDescriptor>,
}

impl InputDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            components: vec![],
        }
    }

    pub fn tuple(
        name: impl Into<String>,
        components: Vec<InputDescriptor>,
    ) -> Self {
        let ty = format!("tuple({})", join_types(&components));
        Self {
            name: name.into(),
            ty,
            components,
        }
    }

    /// Unnamed ABI params are named after their position, e.g. `param0`.
    pub fn from_param(index: usize, param: &Param) -> Self {
        let name = if param.name.is_empty() {
            format!("param{}", index)
        } else {
            param.name.clone()
        };
        let components: Vec<_> = param
            .components
            .iter()
            .enumerate()
            .map(|(i, c)| Self::from_param(i, c))
            .collect();
        let ty = match param.ty.strip_prefix("tuple") {
            Some(suffix) => {
                format!("tuple({}){}", join_types(&components), suffix)
            }
            None => param.ty.clone(),
        };
        Self {
            name,
            ty,
            components,
        }
    }

    /// A single tuple value. Arrays of tuples are not tuples.
    pub fn is_tuple(&self) -> bool {
        self.ty.starts_with("tuple(") && self.ty.ends_with(')')
    }

    pub fn is_array(&self) -> bool {
        self.ty.ends_with(']')
    }

    /// Type as it appears in a function selector, e.g. `(address,uint256)[]`.
    pub fn canonical_type(&self) -> String {
        if !self.ty.starts_with("tuple(") {
            return self.ty.clone();
        }
        let suffix = self
            .ty
            .rfind(')')
            .map(|i| &self.ty[i + 1..])
            .unwrap_or_default();
        let inner = self
            .components
            .iter()
            .map(|c| c.canonical_type())
            .collect::<Vec<_>>()
            .join(",");
        format!("({}){}", inner, suffix)
    }
}

fn join_types(components: &[InputDescriptor]) -> String {
    components
        .iter()
        .map(|c| c.ty.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// One contract-exposed function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub is_view: bool,
    pub inputs: Vec<InputDescriptor>,
}

impl FunctionDescriptor {
    pub fn new(
        name: impl Into<String>,
        is_view: bool,
        inputs: Vec<InputDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            is_view,
            inputs,
        }
    }

    pub fn signature(&self) -> String {
        let types = self
            .inputs
            .iter()
            .map(|i| i.canonical_type())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}({})", self.name, types)
    }
}

impl From<&Function> for FunctionDescriptor {
    fn from(f: &Function) -> Self {
        let is_view = matches!(
            f.state_mutability,
            StateMutability::View | StateMutability::Pure
        );
        let inputs = f
            .inputs
            .iter()
            .enumerate()
            .map(|(i, p)| InputDescriptor::from_param(i, p))
            .collect();
        Self {
            name: f.name.clone(),
            is_view,
            inputs,
        }
    }
}

/// All functions of an ABI JSON document, in declaration order.
///
/// Entries without a `type` are functions. Events, errors, constructors
/// and fallbacks are skipped.
pub fn function_descriptors(
    abi: &str,
) -> Result<Vec<FunctionDescriptor>, serde_json::Error> {
    let items: Vec<serde_json::Value> = serde_json::from_str(abi)?;
    items
        .into_iter()
        .filter(|item| {
            item.get("type")
                .and_then(serde_json::Value::as_str)
                .map_or(true, |ty| ty == "function")
        })
        .map(|item| {
            serde_json::from_value::<Function>(item)
                .map(|f| FunctionDescriptor::from(&f))
        })
        .collect()
}
