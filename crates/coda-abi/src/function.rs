//! Function signatures, selectors, and contract call helpers
//!
//! A human-written signature like `"getSchema(bytes32 uid)"` resolves into
//! its canonical form (names stripped), input types, and 4-byte selector.
//! Return types are supplied separately; Solidity signatures do not carry
//! them.

use bytes::Bytes;
use coda_crypto::keccak256;
use coda_primitives::{Address, H256};

use crate::decode::decode;
use crate::encode::encode_function_call;
use crate::error::AbiError;
use crate::parser::parse_param_list;
use crate::token::Token;
use crate::types::{Param, ParamType};

/// A resolved function signature
#[derive(Debug, Clone)]
pub struct Function {
    /// Function name
    pub name: String,
    /// Input parameters, names retained when the source carried them
    pub inputs: Vec<Param>,
    /// Output types, supplied by the caller via [`Function::with_outputs`]
    pub outputs: Vec<ParamType>,
    /// Canonical signature: types only, comma-separated, no spaces, no names
    pub signature: String,
    /// First 4 bytes of `keccak256(signature)`
    pub selector: [u8; 4],
}

impl Function {
    /// Attach the output types used by [`Function::decode_output`]
    pub fn with_outputs(mut self, outputs: Vec<ParamType>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Input types, name annotations stripped
    pub fn input_types(&self) -> Vec<ParamType> {
        self.inputs.iter().map(|p| p.kind.clone()).collect()
    }

    /// Encode a call to this function: selector followed by the argument
    /// body
    pub fn encode_call(&self, args: &[Token]) -> Result<Bytes, AbiError> {
        let types = self.input_types();
        encode_function_call(self.selector, &types, args).map(Bytes::from)
    }

    /// Decode return data against the attached output types
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        decode(&self.outputs, data)
    }
}

/// Resolve a human-written function signature.
///
/// Accepts both canonical (`"transfer(address,uint256)"`) and
/// name-annotated (`"transfer(address to, uint256 amount)"`) forms; the
/// selector is always computed over the canonical form.
pub fn resolve_signature(signature: &str) -> Result<Function, AbiError> {
    let signature = signature.trim();
    let open = signature
        .find('(')
        .ok_or_else(|| AbiError::TypeSyntax(format!("missing parameter list in {:?}", signature)))?;
    let name = signature[..open].trim();
    if !is_identifier(name) {
        return Err(AbiError::TypeSyntax(format!(
            "invalid function name in {:?}",
            signature
        )));
    }
    if !signature.ends_with(')') {
        return Err(AbiError::TypeSyntax(format!(
            "signature {:?} must end with `)`",
            signature
        )));
    }
    let inputs = parse_param_list(&signature[open + 1..signature.len() - 1])?;

    let types: Vec<String> = inputs.iter().map(|p| p.kind.to_string()).collect();
    let canonical = format!("{}({})", name, types.join(","));
    let selector = function_selector(&canonical);

    Ok(Function {
        name: name.to_string(),
        inputs,
        outputs: Vec::new(),
        signature: canonical,
        selector,
    })
}

/// Compute a function selector over an already-canonical signature: the
/// first 4 bytes of its Keccak-256 hash
pub fn function_selector(canonical: &str) -> [u8; 4] {
    let hash = keccak256(canonical.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

/// Compute the topic0 of an event: the full Keccak-256 hash of its
/// canonical signature
pub fn event_topic(signature: &str) -> Result<H256, AbiError> {
    let resolved = resolve_signature(signature)?;
    Ok(keccak256(resolved.signature.as_bytes()))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Contract helper: a registry of resolved functions addressable by name
#[derive(Debug, Clone)]
pub struct Contract {
    address: Address,
    functions: Vec<Function>,
}

impl Contract {
    /// Create an empty contract helper
    pub fn new(address: Address) -> Self {
        Self {
            address,
            functions: Vec::new(),
        }
    }

    /// Contract address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Look up a function by name
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Encode a call to a registered function
    pub fn encode_call(&self, function_name: &str, args: &[Token]) -> Result<Bytes, AbiError> {
        let function = self
            .function(function_name)
            .ok_or_else(|| AbiError::UnknownFunction(function_name.to_string()))?;
        function.encode_call(args)
    }

    /// Decode a registered function's return data
    pub fn decode_output(&self, function_name: &str, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        let function = self
            .function(function_name)
            .ok_or_else(|| AbiError::UnknownFunction(function_name.to_string()))?;
        function.decode_output(data)
    }
}

/// Builder for contract helpers, declared by human-readable signatures
pub struct ContractBuilder {
    address: Address,
    functions: Vec<Function>,
}

impl ContractBuilder {
    /// Start a builder for the given contract address
    pub fn new(address: Address) -> Self {
        Self {
            address,
            functions: Vec::new(),
        }
    }

    /// Register a function by signature, with a comma-separated return-type
    /// list (empty for none)
    pub fn function(mut self, signature: &str, outputs: &str) -> Result<Self, AbiError> {
        let output_types = parse_param_list(outputs)?
            .into_iter()
            .map(|p| p.kind)
            .collect();
        self.functions
            .push(resolve_signature(signature)?.with_outputs(output_types));
        Ok(self)
    }

    /// Build the contract
    pub fn build(self) -> Contract {
        Contract {
            address: self.address,
            functions: self.functions,
        }
    }
}

/// Create an ERC-20 contract helper
pub fn erc20(address: Address) -> Contract {
    let build = || -> Result<Contract, AbiError> {
        Ok(ContractBuilder::new(address)
            .function("name()", "string")?
            .function("symbol()", "string")?
            .function("decimals()", "uint8")?
            .function("totalSupply()", "uint256")?
            .function("balanceOf(address owner)", "uint256")?
            .function("transfer(address to, uint256 amount)", "bool")?
            .function("approve(address spender, uint256 amount)", "bool")?
            .function("allowance(address owner, address spender)", "uint256")?
            .function("transferFrom(address from, address to, uint256 amount)", "bool")?
            .build())
    };
    build().expect("static ERC-20 signatures always parse")
}
