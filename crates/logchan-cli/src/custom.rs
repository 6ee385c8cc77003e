//! crates/logchan-cli/src/custom.rs
//! Parsing of `--custom KEY:BIT:DESC` channel definitions.

use logchan::{Channel, Level};

use crate::error::CliError;

/// Parses one `KEY:BIT:DESC` definition.
///
/// `KEY` is a single printable ASCII character, `BIT` a bit index in the
/// custom range (`0..=58`) and `DESC` a non-empty label. The description may
/// itself contain `:`.
pub(crate) fn parse_custom_channel(spec: &str) -> Result<Channel, CliError> {
    let invalid = |reason| CliError::InvalidCustom {
        spec: spec.to_owned(),
        reason,
    };

    let mut parts = spec.splitn(3, ':');
    let (Some(key), Some(bit), Some(description)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid("expected KEY:BIT:DESC"));
    };

    let key = match key.as_bytes() {
        [byte] if byte.is_ascii_graphic() => *byte,
        _ => return Err(invalid("key must be one printable ASCII character")),
    };

    let level = bit
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(Level::bit)
        .filter(|level| Level::CUSTOM_MASK.contains(*level))
        .ok_or_else(|| invalid("bit must be an index between 0 and 58"))?;

    if description.is_empty() {
        return Err(invalid("description must not be empty"));
    }

    Ok(Channel::new(level, key, description.to_owned()))
}
