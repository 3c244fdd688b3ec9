use crate::error::ResolveError;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Checks that `name` can be sent as a DNS question. A single trailing dot is accepted.
pub fn validate(name: &str) -> Result<(), ResolveError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);

    if trimmed.is_empty() {
        return Err(ResolveError::invalid(name, "empty name"));
    }

    if trimmed.len() > MAX_NAME_LEN {
        return Err(ResolveError::invalid(name, "name too long"));
    }

    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(ResolveError::invalid(name, "empty label"));
        }

        if label.len() > MAX_LABEL_LEN {
            return Err(ResolveError::invalid(name, "label too long"));
        }

        if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(ResolveError::invalid(name, "invalid character"));
        }
    }

    Ok(())
}
