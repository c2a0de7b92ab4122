//! Contract interface definitions and call-data entry points

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use calldata_primitives::H256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{parse_param, parse_signature_with};
use crate::encode::Encoder;
use crate::selector::{selector, signature, signature_hash, Selector};
use crate::{AbiError, AbiResult, EncoderConfig, ParamType, Token};

/// Declared parameter of a function, event or error
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// Parameter name, may be empty
    #[serde(default)]
    pub name: String,
    /// Declared type string
    #[serde(rename = "type")]
    pub ty: String,
    /// Tuple components
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Param>,
    /// Compiler-specific type name, not used for encoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
}

impl Param {
    /// Create a parameter
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    /// Attach tuple components
    pub fn with_components(mut self, components: Vec<Param>) -> Self {
        self.components = components;
        self
    }

    /// Classify with the default limits
    pub fn param_type(&self) -> AbiResult<ParamType> {
        parse_param(self, &EncoderConfig::default())
    }
}

/// Event input: a parameter plus its `indexed` flag
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventParam {
    /// Underlying parameter
    #[serde(flatten)]
    pub param: Param,
    /// Stored as a topic rather than in the data section
    #[serde(default)]
    pub indexed: bool,
}

/// Declared state mutability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    /// Reads no state
    Pure,
    /// Reads but does not modify state
    View,
    /// Modifies state, rejects value
    NonPayable,
    /// Modifies state, accepts value
    Payable,
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::NonPayable => "nonpayable",
            StateMutability::Payable => "payable",
        })
    }
}

/// Category of a callable entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    /// Selector-dispatched function
    Function,
    /// Deployment constructor
    Constructor,
    /// Plain value transfer handler
    Receive,
}

/// Function definition.
///
/// Input types and the selector are resolved once at construction; a
/// `FunctionDef` cannot be mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    kind: FunctionKind,
    name: String,
    inputs: Vec<Param>,
    outputs: Vec<Param>,
    state_mutability: StateMutability,
    payable: bool,
    constant: bool,
    input_types: Vec<ParamType>,
    signature: String,
    selector: Selector,
    encoder: Encoder,
}

impl FunctionDef {
    /// Resolve a definition with the default limits
    pub fn new(
        kind: FunctionKind,
        name: impl Into<String>,
        inputs: Vec<Param>,
        state_mutability: StateMutability,
    ) -> AbiResult<Self> {
        Self::with_config(kind, name, inputs, state_mutability, &EncoderConfig::default())
    }

    /// Resolve a definition, classifying inputs under `config`
    pub fn with_config(
        kind: FunctionKind,
        name: impl Into<String>,
        inputs: Vec<Param>,
        state_mutability: StateMutability,
        config: &EncoderConfig,
    ) -> AbiResult<Self> {
        let name = name.into();
        let input_types = inputs
            .iter()
            .map(|p| parse_param(p, config))
            .collect::<AbiResult<Vec<_>>>()?;
        let signature = signature(&name, &input_types);
        let selector = selector(&name, &input_types);
        Ok(Self {
            kind,
            name,
            inputs,
            outputs: Vec::new(),
            state_mutability,
            payable: state_mutability == StateMutability::Payable,
            constant: matches!(state_mutability, StateMutability::Pure | StateMutability::View),
            input_types,
            signature,
            selector,
            encoder: Encoder::new(config.clone()),
        })
    }

    /// Selector-dispatched function
    pub fn function(
        name: impl Into<String>,
        inputs: Vec<Param>,
        state_mutability: StateMutability,
    ) -> AbiResult<Self> {
        Self::new(FunctionKind::Function, name, inputs, state_mutability)
    }

    /// Constructor
    pub fn constructor(inputs: Vec<Param>, state_mutability: StateMutability) -> AbiResult<Self> {
        Self::new(FunctionKind::Constructor, "", inputs, state_mutability)
    }

    /// Attach output parameters
    pub fn with_outputs(mut self, outputs: Vec<Param>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Override the legacy `payable` / `constant` flags
    pub fn with_legacy_flags(mut self, payable: bool, constant: bool) -> Self {
        self.payable = payable;
        self.constant = constant;
        self
    }

    /// Entry category
    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// Function name (empty for constructor and receive)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared inputs
    pub fn inputs(&self) -> &[Param] {
        &self.inputs
    }

    /// Declared outputs
    pub fn outputs(&self) -> &[Param] {
        &self.outputs
    }

    /// Resolved input types, in declaration order
    pub fn input_types(&self) -> &[ParamType] {
        &self.input_types
    }

    /// Declared state mutability
    pub fn state_mutability(&self) -> StateMutability {
        self.state_mutability
    }

    /// Legacy `payable` flag
    pub fn is_payable(&self) -> bool {
        self.payable
    }

    /// Legacy `constant` flag
    pub fn is_constant(&self) -> bool {
        self.constant
    }

    /// Canonical signature (e.g., "transfer(address,uint256)")
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Function selector (4 bytes)
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Encode arguments without a selector, under the limits the
    /// definition was resolved with
    pub fn encode_args(&self, args: &[Token]) -> AbiResult<Vec<u8>> {
        self.encoder.encode_tuple(&self.input_types, args)
    }

    /// Encode a call: selector followed by arguments
    pub fn encode_input(&self, args: &[Token]) -> AbiResult<Vec<u8>> {
        let mut data = self.selector.to_vec();
        data.extend(self.encode_args(args)?);
        Ok(data)
    }
}

/// Event definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDef {
    name: String,
    inputs: Vec<EventParam>,
    anonymous: bool,
    signature: String,
}

impl EventDef {
    /// Resolve an event definition
    pub fn new(
        name: impl Into<String>,
        inputs: Vec<EventParam>,
        anonymous: bool,
    ) -> AbiResult<Self> {
        Self::with_config(name, inputs, anonymous, &EncoderConfig::default())
    }

    /// Resolve an event definition under `config`
    pub fn with_config(
        name: impl Into<String>,
        inputs: Vec<EventParam>,
        anonymous: bool,
        config: &EncoderConfig,
    ) -> AbiResult<Self> {
        let name = name.into();
        let types = inputs
            .iter()
            .map(|p| parse_param(&p.param, config))
            .collect::<AbiResult<Vec<_>>>()?;
        let signature = signature(&name, &types);
        Ok(Self {
            name,
            inputs,
            anonymous,
            signature,
        })
    }

    /// Event name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared inputs
    pub fn inputs(&self) -> &[EventParam] {
        &self.inputs
    }

    /// Emitted without a signature topic
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Canonical signature
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Keccak-256 of the canonical signature (topic 0 of non-anonymous logs)
    pub fn topic(&self) -> H256 {
        calldata_crypto::keccak256(self.signature.as_bytes())
    }
}

/// Custom error definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDef {
    name: String,
    inputs: Vec<Param>,
    input_types: Vec<ParamType>,
}

impl ErrorDef {
    /// Resolve an error definition
    pub fn new(name: impl Into<String>, inputs: Vec<Param>) -> AbiResult<Self> {
        Self::with_config(name, inputs, &EncoderConfig::default())
    }

    /// Resolve an error definition under `config`
    pub fn with_config(
        name: impl Into<String>,
        inputs: Vec<Param>,
        config: &EncoderConfig,
    ) -> AbiResult<Self> {
        let input_types = inputs
            .iter()
            .map(|p| parse_param(p, config))
            .collect::<AbiResult<Vec<_>>>()?;
        Ok(Self {
            name: name.into(),
            inputs,
            input_types,
        })
    }

    /// Error name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared inputs
    pub fn inputs(&self) -> &[Param] {
        &self.inputs
    }

    /// Canonical signature
    pub fn signature(&self) -> String {
        signature(&self.name, &self.input_types)
    }

    /// 4-byte revert selector
    pub fn selector(&self) -> Selector {
        selector(&self.name, &self.input_types)
    }

    /// Full hash of the signature
    pub fn signature_hash(&self) -> H256 {
        signature_hash(&self.name, &self.input_types)
    }
}

/// A contract interface: constructor, functions, events and errors.
///
/// Built once through [`InterfaceBuilder`] (or parsed from JSON) and
/// read-only afterwards, so it can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct Interface {
    constructor: Option<FunctionDef>,
    receive: Option<FunctionDef>,
    /// Keyed by canonical signature, so overloads coexist
    functions: BTreeMap<String, FunctionDef>,
    events: BTreeMap<String, EventDef>,
    errors: BTreeMap<String, ErrorDef>,
    encoder: Encoder,
}

impl Interface {
    /// Start building an interface
    pub fn builder() -> InterfaceBuilder {
        InterfaceBuilder::new()
    }

    /// Constructor, if declared
    pub fn constructor(&self) -> Option<&FunctionDef> {
        self.constructor.as_ref()
    }

    /// Receive function, if declared
    pub fn receive(&self) -> Option<&FunctionDef> {
        self.receive.as_ref()
    }

    /// All functions, ordered by signature
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.functions.values()
    }

    /// Every overload sharing `name`
    pub fn overloads<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FunctionDef> + 'a {
        self.functions.values().filter(move |f| f.name() == name)
    }

    /// Look up a function by canonical signature or unambiguous bare name
    pub fn function(&self, name: &str) -> AbiResult<&FunctionDef> {
        self.resolve_function(name, None)
    }

    /// Event by name
    pub fn event(&self, name: &str) -> Option<&EventDef> {
        self.events.get(name)
    }

    /// All events, ordered by name
    pub fn events(&self) -> impl Iterator<Item = &EventDef> {
        self.events.values()
    }

    /// Error by name
    pub fn error(&self, name: &str) -> Option<&ErrorDef> {
        self.errors.get(name)
    }

    /// All errors, ordered by name
    pub fn errors(&self) -> impl Iterator<Item = &ErrorDef> {
        self.errors.values()
    }

    /// Limits used by this interface's encoder
    pub fn config(&self) -> &EncoderConfig {
        self.encoder.config()
    }

    /// Encode constructor arguments, without a selector
    pub fn encode_constructor_call_data(&self, args: &[Token]) -> AbiResult<Bytes> {
        let constructor = self.constructor.as_ref().ok_or(AbiError::MissingConstructor)?;
        debug!(args = args.len(), "encoding constructor call data");
        let data = self.encoder.encode_tuple(constructor.input_types(), args)?;
        Ok(Bytes::from(data))
    }

    /// Encode a function call: selector followed by arguments.
    ///
    /// `name` is a canonical signature (`transfer(address,uint256)`) or a bare
    /// name. A bare name shared by several overloads picks the one whose
    /// input count equals `args.len()`.
    pub fn encode_function_call_data(&self, name: &str, args: &[Token]) -> AbiResult<Bytes> {
        let function = self.resolve_function(name, Some(args.len()))?;
        debug!(
            function = function.signature(),
            selector = %hex::encode(function.selector()),
            args = args.len(),
            "encoding function call data"
        );

        let encoded = self.encoder.encode_tuple(function.input_types(), args)?;
        let mut data = Vec::with_capacity(4 + encoded.len());
        data.extend_from_slice(&function.selector());
        data.extend(encoded);
        Ok(Bytes::from(data))
    }

    fn resolve_function(&self, name: &str, arity: Option<usize>) -> AbiResult<&FunctionDef> {
        if name.contains('(') {
            let unknown = || AbiError::UnknownFunction(name.to_string());
            let (bare, types) =
                parse_signature_with(name, self.config()).map_err(|_| unknown())?;
            return self.functions.get(&signature(&bare, &types)).ok_or_else(unknown);
        }

        let overloads: Vec<&FunctionDef> =
            self.functions.values().filter(|f| f.name() == name).collect();
        match overloads.as_slice() {
            [] => Err(AbiError::UnknownFunction(name.to_string())),
            [only] => Ok(*only),
            many => {
                let mut matching = many
                    .iter()
                    .filter(|f| arity.is_some_and(|n| f.inputs().len() == n));
                match (matching.next(), matching.next()) {
                    (Some(f), None) => Ok(*f),
                    _ => Err(AbiError::AmbiguousFunction(name.to_string())),
                }
            }
        }
    }
}

/// Builder for an [`Interface`]; duplicate entries are rejected at `build`
#[derive(Debug, Default)]
pub struct InterfaceBuilder {
    config: EncoderConfig,
    constructors: Vec<FunctionDef>,
    receives: Vec<FunctionDef>,
    functions: Vec<FunctionDef>,
    events: Vec<EventDef>,
    errors: Vec<ErrorDef>,
}

impl InterfaceBuilder {
    /// Create a new interface builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder limits for the built interface
    pub fn config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a function, constructor or receive entry
    pub fn function(mut self, function: FunctionDef) -> Self {
        match function.kind() {
            FunctionKind::Function => self.functions.push(function),
            FunctionKind::Constructor => self.constructors.push(function),
            FunctionKind::Receive => self.receives.push(function),
        }
        self
    }

    /// Add an event
    pub fn event(mut self, event: EventDef) -> Self {
        self.events.push(event);
        self
    }

    /// Add an error
    pub fn error(mut self, error: ErrorDef) -> Self {
        self.errors.push(error);
        self
    }

    /// Check invariants and freeze the interface
    pub fn build(self) -> AbiResult<Interface> {
        self.config.validate()?;

        if self.constructors.len() > 1 {
            return Err(AbiError::Parse("constructor is already set".to_string()));
        }
        if self.receives.len() > 1 {
            return Err(AbiError::Parse("receive is already set".to_string()));
        }

        let mut functions = BTreeMap::new();
        for function in self.functions {
            match functions.entry(function.signature().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(AbiError::Parse(format!("function {} is already set", entry.key())))
                }
                Entry::Vacant(entry) => {
                    entry.insert(function);
                }
            }
        }

        let mut events = BTreeMap::new();
        for event in self.events {
            match events.entry(event.name().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(AbiError::Parse(format!("event {} is already set", entry.key())))
                }
                Entry::Vacant(entry) => {
                    entry.insert(event);
                }
            }
        }

        let mut errors = BTreeMap::new();
        for error in self.errors {
            match errors.entry(error.name().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(AbiError::Parse(format!("error {} is already set", entry.key())))
                }
                Entry::Vacant(entry) => {
                    entry.insert(error);
                }
            }
        }

        debug!(
            functions = functions.len(),
            events = events.len(),
            errors = errors.len(),
            "built interface"
        );

        Ok(Interface {
            constructor: self.constructors.into_iter().next(),
            receive: self.receives.into_iter().next(),
            functions,
            events,
            errors,
            encoder: Encoder::new(self.config),
        })
    }
}
