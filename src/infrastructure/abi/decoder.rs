//! Call decoder implementation using alloy-dyn-abi

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::{Function, JsonAbi};

use crate::domain::abi::{CallDecoder, DecodeError, DecodedArg, DecodedCall};
use crate::domain::Transaction;

/// Decodes calldata by selector lookup over an ABI's functions
#[derive(Debug, Default, Clone, Copy)]
pub struct AlloyCallDecoder;

impl AlloyCallDecoder {
    pub fn new() -> Self {
        Self
    }

    fn decode_with(function: &Function, args_data: &[u8]) -> Result<DecodedCall, DecodeError> {
        let types: Vec<DynSolType> = function
            .inputs
            .iter()
            .map(|param| {
                param.resolve().map_err(|err| {
                    DecodeError::Unsupported(format!(
                        "type '{}' of parameter '{}' in {}: {err}",
                        param.ty, param.name, function.name
                    ))
                })
            })
            .collect::<Result<_, _>>()?;

        let values = if types.is_empty() {
            Vec::new()
        } else {
            let decoded = DynSolType::Tuple(types.clone())
                .abi_decode_params(args_data)
                .map_err(|err| DecodeError::ArgumentDecode {
                    function: function.signature(),
                    reason: err.to_string(),
                })?;

            match decoded {
                DynSolValue::Tuple(values) => values,
                other => vec![other],
            }
        };

        let arguments = function
            .inputs
            .iter()
            .zip(types)
            .zip(values)
            .enumerate()
            .map(|(idx, ((param, kind), value))| {
                let name = if param.name.trim().is_empty() {
                    format!("arg{idx}")
                } else {
                    param.name.clone()
                };
                DecodedArg { name, kind, value }
            })
            .collect();

        Ok(DecodedCall {
            function_name: function.name.clone(),
            signature: function.signature(),
            arguments,
        })
    }
}

impl CallDecoder for AlloyCallDecoder {
    fn decode(&self, abi: &JsonAbi, tx: &Transaction) -> Result<DecodedCall, DecodeError> {
        let data = tx
            .calldata()
            .map_err(|err| DecodeError::InvalidCalldata(err.to_string()))?;

        if data.len() < 4 {
            return Err(DecodeError::InvalidCalldata(format!(
                "calldata too short ({} bytes, need at least 4 for selector)",
                data.len()
            )));
        }

        let (selector, args_data) = data.split_at(4);
        let function = abi
            .functions()
            .find(|function| function.selector().as_slice() == selector)
            .ok_or_else(|| DecodeError::UnknownSelector(hex::encode(selector)))?;

        Self::decode_with(function, args_data)
    }
}
