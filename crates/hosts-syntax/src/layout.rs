//! Column layout for mapping lines

use crate::token::IpMapping;

/// Columns before the IP field.
pub const MIN_SPACING_TO_IP: usize = 0;
/// Spaces between the widest IP cell and the alias column.
pub const MIN_SPACING_TO_ALIAS: usize = 8;
/// Spaces between two aliases on the same line.
pub const MIN_SPACING_BETWEEN_ALIASES: usize = 2;
/// Spaces between the widest alias list and the comment column.
pub const MIN_SPACING_TO_COMMENT: usize = 1;

/// Minimum gaps used when laying out mapping lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub to_ip: usize,
    pub to_alias: usize,
    pub between_aliases: usize,
    pub to_comment: usize,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            to_ip: MIN_SPACING_TO_IP,
            to_alias: MIN_SPACING_TO_ALIAS,
            between_aliases: MIN_SPACING_BETWEEN_ALIASES,
            to_comment: MIN_SPACING_TO_COMMENT,
        }
    }
}

/// Zero-based character columns where each field of a mapping line starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub ip: usize,
    pub alias: usize,
    pub comment: usize,
}

impl Columns {
    /// Columns for the given widest IP cell and widest alias list.
    pub fn from_widths(spacing: &Spacing, ip_width: usize, aliases_width: usize) -> Self {
        let ip = spacing.to_ip;
        let alias = ip + ip_width + spacing.to_alias;
        let comment = alias + aliases_width + spacing.to_comment;
        Self { ip, alias, comment }
    }

    /// Columns laid out for a single mapping on its own.
    pub fn for_mapping(spacing: &Spacing, mapping: &IpMapping) -> Self {
        Self::from_widths(
            spacing,
            mapping.ip_cell_width(),
            mapping.aliases_width(spacing.between_aliases),
        )
    }

    /// Recover the columns an existing mapping line was written with.
    ///
    /// Without a comment on the line, the comment column falls
    /// `spacing.to_comment` past the end of the last alias.
    pub fn observe(raw: &str, spacing: &Spacing) -> Option<Self> {
        let chars: Vec<char> = raw.trim_end_matches('\r').chars().collect();
        let skip = |mut pos: usize, want_space: bool| {
            while pos < chars.len() && chars[pos].is_whitespace() == want_space {
                pos += 1;
            }
            pos
        };

        let ip = skip(0, true);
        let alias = skip(skip(ip, false), true);
        if alias >= chars.len() || chars[alias] == '#' {
            return None;
        }

        let comment = match chars[alias..].iter().position(|c| *c == '#') {
            Some(offset) => alias + offset,
            None => {
                let content_end = chars
                    .iter()
                    .rposition(|c| !c.is_whitespace())
                    .map_or(alias, |last| last + 1);
                content_end + spacing.to_comment
            }
        };

        Some(Self { ip, alias, comment })
    }

    /// Render `mapping` at these columns.
    ///
    /// A field that would start at or before the end of the previous one is
    /// separated from it by a single space instead.
    pub fn render(&self, mapping: &IpMapping, spacing: &Spacing) -> String {
        let mut line = String::new();
        pad_to(&mut line, self.ip);
        if mapping.disabled {
            line.push_str("# ");
        }
        line.push_str(&mapping.ip);

        pad_to(&mut line, self.alias);
        line.push_str(&mapping.aliases.join(&" ".repeat(spacing.between_aliases)));

        if !mapping.comment.is_empty() {
            pad_to(&mut line, self.comment);
            line.push_str("# ");
            line.push_str(&mapping.comment);
        }
        line
    }
}

fn pad_to(line: &mut String, column: usize) {
    let width = line.chars().count();
    if width < column {
        line.extend(std::iter::repeat_n(' ', column - width));
    } else if width > 0 {
        line.push(' ');
    }
}
