use el_core::class::ClassHandle;
use el_core::error::{ElError, MemberKind, Thrown};
use el_core::messages::{STATIC_FIELD_READ_ERROR, STATIC_FIELD_WRITE_ERROR, STATIC_INVOCATION_ERROR};
use el_core::ElContext;

/// Field missing, not public or not static.
pub fn field_not_found(ctx: &ElContext, class: &ClassHandle, field: &str) -> ElError {
    let message = ctx.message(STATIC_FIELD_READ_ERROR, &[class.name(), field]);
    ctx.diagnostics().report(
        ElError::MemberNotFound {
            kind: MemberKind::Field,
            type_name: class.name().to_string(),
            member: field.to_string(),
            message,
        },
        STATIC_FIELD_READ_ERROR,
    )
}

/// Method or constructor lookup failed; `detail` says why.
pub fn member_not_found(
    ctx: &ElContext,
    kind: MemberKind,
    message_id: &str,
    class: &ClassHandle,
    member: &str,
    detail: &str,
) -> ElError {
    let message = ctx.message(message_id, &[class.name(), member, detail]);
    ctx.diagnostics().report(
        ElError::MemberNotFound {
            kind,
            type_name: class.name().to_string(),
            member: member.to_string(),
            message,
        },
        message_id,
    )
}

pub fn not_writable(ctx: &ElContext, class: &ClassHandle, field: &str) -> ElError {
    let message = ctx.message(STATIC_FIELD_WRITE_ERROR, &[class.name(), field]);
    ctx.diagnostics().report(
        ElError::NotWritable {
            type_name: class.name().to_string(),
            member: field.to_string(),
            message,
        },
        STATIC_FIELD_WRITE_ERROR,
    )
}

/// The member ran and threw `cause`.
pub fn invocation_failure(
    ctx: &ElContext,
    class: &ClassHandle,
    member: &str,
    cause: Thrown,
) -> ElError {
    let detail = cause.to_string();
    let message = ctx.message(STATIC_INVOCATION_ERROR, &[class.name(), member, detail.as_str()]);
    ctx.diagnostics().report(
        ElError::InvocationFailure {
            type_name: class.name().to_string(),
            member: member.to_string(),
            message,
            cause,
        },
        STATIC_INVOCATION_ERROR,
    )
}
