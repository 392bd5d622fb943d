// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability table: what a loaded unit exports, by name.
//!
//! Built once from the module's export section at materialization time, so
//! that entry resolution is a map lookup plus a signature check rather than
//! probing a live instance.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use wasmtime::{ExternType, Module};

/// Export name of the optional constructor a unit may declare
/// (the WASI reactor convention).
pub const CONSTRUCTOR_EXPORT: &str = "_initialize";

/// Parameter and result types of an exported function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub params: Vec<String>,
    pub results: Vec<String>,
}

impl FunctionSignature {
    pub fn is_nullary(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) -> ({})", self.params.join(", "), self.results.join(", "))
    }
}

/// The kind of an exported member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    Function(FunctionSignature),
    Memory,
    Table,
    Global,
    Other,
}

impl MemberKind {
    fn label(&self) -> &'static str {
        match self {
            MemberKind::Function(_) => "function",
            MemberKind::Memory => "memory",
            MemberKind::Table => "table",
            MemberKind::Global => "global",
            MemberKind::Other => "non-function",
        }
    }
}

impl From<ExternType> for MemberKind {
    fn from(ty: ExternType) -> Self {
        match ty {
            ExternType::Func(func) => MemberKind::Function(FunctionSignature {
                params: func.params().map(|p| p.to_string()).collect(),
                results: func.results().map(|r| r.to_string()).collect(),
            }),
            ExternType::Memory(_) => MemberKind::Memory,
            ExternType::Table(_) => MemberKind::Table,
            ExternType::Global(_) => MemberKind::Global,
            #[allow(unreachable_patterns)]
            _ => MemberKind::Other,
        }
    }
}

/// Why a member name did not resolve to a zero-parameter function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no export named `{0}`")]
    Missing(String),

    #[error("export `{name}` is a {kind}, not a function")]
    NotAFunction { name: String, kind: &'static str },

    #[error("export `{name}` takes {arity} parameter(s); signature is {signature}")]
    WrongArity {
        name: String,
        arity: usize,
        signature: FunctionSignature,
    },
}

/// Exported members of a unit keyed by export name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityTable {
    members: BTreeMap<String, MemberKind>,
}

impl CapabilityTable {
    /// Reads the export section of a compiled module.
    pub fn from_module(module: &Module) -> Self {
        let members = module
            .exports()
            .map(|export| (export.name().to_string(), MemberKind::from(export.ty())))
            .collect();
        Self { members }
    }

    pub fn get(&self, name: &str) -> Option<&MemberKind> {
        self.members.get(name)
    }

    /// Looks up `name` and requires it to be a function taking no parameters.
    pub fn resolve(&self, name: &str) -> Result<&FunctionSignature, ResolveError> {
        match self.members.get(name) {
            None => Err(ResolveError::Missing(name.to_string())),
            Some(MemberKind::Function(sig)) if sig.is_nullary() => Ok(sig),
            Some(MemberKind::Function(sig)) => Err(ResolveError::WrongArity {
                name: name.to_string(),
                arity: sig.params.len(),
                signature: sig.clone(),
            }),
            Some(other) => Err(ResolveError::NotAFunction {
                name: name.to_string(),
                kind: other.label(),
            }),
        }
    }

    /// The `_initialize` export, if the unit declares one.
    pub fn constructor(&self) -> Option<&MemberKind> {
        self.members.get(CONSTRUCTOR_EXPORT)
    }

    /// Names of exported functions, in sorted order.
    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .filter(|(_, kind)| matches!(kind, MemberKind::Function(_)))
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
