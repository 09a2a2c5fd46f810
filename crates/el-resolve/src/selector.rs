//! Overload selection for constructors and methods.

use std::sync::Arc;

use el_core::class::{ClassHandle, ConstructorDescriptor, MethodDescriptor};
use el_core::error::Thrown;
use el_core::ty::Fit;
use el_core::{TypeDescriptor, Value};
use itertools::Itertools;
use thiserror::Error;

/// A selected, invocable member.
#[derive(Debug, Clone)]
pub enum Member {
    Constructor(Arc<ConstructorDescriptor>),
    Method(Arc<MethodDescriptor>),
}

impl Member {
    pub fn params(&self) -> &[TypeDescriptor] {
        match self {
            Member::Constructor(ctor) => &ctor.params,
            Member::Method(method) => &method.params,
        }
    }

    pub fn signature(&self) -> String {
        format!("({})", self.params().iter().join(", "))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no public member named '{0}'")]
    NotFound(String),
    #[error("no overload accepts ({0})")]
    NoMatch(String),
    #[error("ambiguous call, candidates: {}", .0.join(" "))]
    Ambiguous(Vec<String>),
    #[error("{hints} parameter types given for {args} arguments")]
    HintMismatch { hints: usize, args: usize },
}

/// Picks the constructor or method a call refers to and runs it.
///
/// Implementations must be stateless or internally synchronized: the resolver
/// calls them concurrently without locking.
pub trait MemberSelector: Send + Sync {
    fn find_constructor(
        &self,
        class: &ClassHandle,
        param_types: Option<&[TypeDescriptor]>,
        args: &[Value],
    ) -> Result<Member, SelectionError>;

    fn find_method(
        &self,
        class: &ClassHandle,
        name: &str,
        param_types: Option<&[TypeDescriptor]>,
        args: &[Value],
        static_only: bool,
    ) -> Result<Member, SelectionError>;

    /// Run a selected member. `receiver` is `None` for constructors and static methods.
    fn invoke(
        &self,
        class: &ClassHandle,
        member: &Member,
        receiver: Option<&Value>,
        args: &[Value],
    ) -> Result<Value, Thrown> {
        match member {
            Member::Constructor(ctor) => ctor.construct(class, args),
            Member::Method(method) => method.call(receiver, args),
        }
    }
}

/// Default selector: exact signature when parameter types are given, otherwise
/// arity plus argument compatibility, preferring the candidate with the most
/// exact argument matches.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignatureSelector;

impl SignatureSelector {
    fn choose(
        name: &str,
        candidates: Vec<Member>,
        param_types: Option<&[TypeDescriptor]>,
        args: &[Value],
    ) -> Result<Member, SelectionError> {
        if candidates.is_empty() {
            return Err(SelectionError::NotFound(name.to_string()));
        }

        if let Some(hints) = param_types {
            if hints.len() != args.len() {
                return Err(SelectionError::HintMismatch {
                    hints: hints.len(),
                    args: args.len(),
                });
            }
            let mut exact = candidates
                .into_iter()
                .filter(|member| member.params() == hints)
                .collect::<Vec<_>>();
            return match exact.len() {
                0 => Err(SelectionError::NoMatch(hints.iter().join(", "))),
                1 => Ok(exact.remove(0)),
                _ => Err(SelectionError::Ambiguous(
                    exact.iter().map(Member::signature).collect(),
                )),
            };
        }

        let scored = candidates
            .into_iter()
            .filter(|member| member.params().len() == args.len())
            .filter_map(|member| {
                let fits = member
                    .params()
                    .iter()
                    .zip(args)
                    .map(|(param, arg)| param.fit(arg))
                    .collect::<Option<Vec<_>>>()?;
                let exact = fits.iter().filter(|fit| **fit == Fit::Exact).count();
                Some((exact, member))
            })
            .collect::<Vec<_>>();

        let Some(best) = scored.iter().map(|(exact, _)| *exact).max() else {
            return Err(SelectionError::NoMatch(describe_args(args)));
        };
        let mut winners = scored
            .into_iter()
            .filter(|(exact, _)| *exact == best)
            .map(|(_, member)| member)
            .collect::<Vec<_>>();
        if winners.len() > 1 {
            return Err(SelectionError::Ambiguous(
                winners.iter().map(Member::signature).collect(),
            ));
        }
        Ok(winners.remove(0))
    }
}

impl MemberSelector for SignatureSelector {
    fn find_constructor(
        &self,
        class: &ClassHandle,
        param_types: Option<&[TypeDescriptor]>,
        args: &[Value],
    ) -> Result<Member, SelectionError> {
        let candidates = class
            .constructors
            .iter()
            .filter(|ctor| ctor.is_public())
            .cloned()
            .map(Member::Constructor)
            .collect();
        Self::choose(class.simple_name(), candidates, param_types, args)
    }

    fn find_method(
        &self,
        class: &ClassHandle,
        name: &str,
        param_types: Option<&[TypeDescriptor]>,
        args: &[Value],
        static_only: bool,
    ) -> Result<Member, SelectionError> {
        let candidates = class
            .methods_named(name)
            .filter(|method| method.is_public())
            .filter(|method| !static_only || method.is_static())
            .cloned()
            .map(Member::Method)
            .collect();
        Self::choose(name, candidates, param_types, args)
    }
}

fn describe_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| {
            arg.type_descriptor()
                .map(|ty| ty.to_string())
                .unwrap_or_else(|| "null".to_string())
        })
        .join(", ")
}
