//! Built-in members: `to_string` everywhere, `parse` on numbers and `bool`.

use conform_ir::{Builtin, TypeRef};
use conform_value::{parse_failure, type_mismatch, EvalError, Value};

use super::TypeRegistry;

pub(super) fn register(registry: &mut TypeRegistry) {
    for builtin in Builtin::ALL {
        if builtin == Builtin::Void {
            continue;
        }
        registry.extend_builtin(builtin, |b| {
            let b = b.method("to_string", [], TypeRef::STR, |recv, _| {
                Ok(Value::string(
                    recv.map(Value::display_value).unwrap_or_default(),
                ))
            });
            if builtin.is_numeric() || builtin == Builtin::Bool {
                b.static_method(
                    "parse",
                    [TypeRef::STR],
                    TypeRef::Builtin(builtin),
                    move |_, args| {
                        let text = args
                            .first()
                            .and_then(Value::as_str)
                            .ok_or_else(|| {
                                type_mismatch("str", args.first().map_or("void", Value::type_name))
                            })?;
                        parse_builtin(builtin, text)
                    },
                )
            } else {
                b
            }
        });
    }
}

/// Parse `text` as a value of `builtin`.
pub fn parse_builtin(builtin: Builtin, text: &str) -> Result<Value, EvalError> {
    let trimmed = text.trim();
    let fail = || parse_failure(text, builtin.name());
    Ok(match builtin {
        Builtin::Bool => match trimmed.to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => return Err(fail()),
        },
        Builtin::Char => {
            let mut units = text.encode_utf16();
            match (units.next(), units.next()) {
                (Some(unit), None) => Value::Char(unit),
                _ => return Err(fail()),
            }
        }
        Builtin::I8 => Value::I8(trimmed.parse().map_err(|_| fail())?),
        Builtin::U8 => Value::U8(trimmed.parse().map_err(|_| fail())?),
        Builtin::I16 => Value::I16(trimmed.parse().map_err(|_| fail())?),
        Builtin::U16 => Value::U16(trimmed.parse().map_err(|_| fail())?),
        Builtin::I32 => Value::I32(trimmed.parse().map_err(|_| fail())?),
        Builtin::U32 => Value::U32(trimmed.parse().map_err(|_| fail())?),
        Builtin::I64 => Value::I64(trimmed.parse().map_err(|_| fail())?),
        Builtin::U64 => Value::U64(trimmed.parse().map_err(|_| fail())?),
        Builtin::F32 => Value::F32(trimmed.parse().map_err(|_| fail())?),
        Builtin::F64 => Value::F64(trimmed.parse().map_err(|_| fail())?),
        Builtin::Str => Value::string(text),
        Builtin::Object | Builtin::Void => return Err(fail()),
    })
}
