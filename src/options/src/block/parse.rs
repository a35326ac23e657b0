// modflowrs-options/src/block/parse.rs

//! Reading option blocks and option lines.

use super::{OptionBlock, ParseMode, RepresentationMode};
use crate::error::{OptionBlockError, Result};
use crate::spec::{Arity, OptionSpec, OptionsSpec};
use crate::value::OptionValue;
use log::{debug, warn};

const BLOCK_START: &str = "OPTIONS";
const BLOCK_END: &str = "END";

fn is_block_start(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    matches!(tokens.next(), Some(t) if t.eq_ignore_ascii_case(BLOCK_START)) && tokens.next().is_none()
}

/// `END` or `END OPTIONS`
fn is_block_end(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [end] => end.eq_ignore_ascii_case(BLOCK_END),
        [end, options] => {
            end.eq_ignore_ascii_case(BLOCK_END) && options.eq_ignore_ascii_case(BLOCK_START)
        }
        _ => false,
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

impl OptionBlock {
    /// Parse an option block or option line with strict checking.
    pub fn parse(text: &str, spec: &OptionsSpec) -> Result<Self> {
        Self::parse_with(text, spec, ParseMode::Strict)
    }

    /// Parse an option block or option line.
    ///
    /// The representation mode is taken from the grammar that matched: text
    /// whose first line is `OPTIONS` is a block, anything else must be a
    /// single option line.
    pub fn parse_with(text: &str, spec: &OptionsSpec, parse_mode: ParseMode) -> Result<Self> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let Some(&(_, first)) = lines.first() else {
            return Ok(Self::new(spec.clone(), RepresentationMode::Line));
        };

        if is_block_start(first) {
            Self::parse_block(&lines[1..], spec, parse_mode)
        } else {
            if let Some(&(line_no, _)) = lines.get(1) {
                return Err(OptionBlockError::parse_error(
                    "an option line must be a single line; use an OPTIONS block for more",
                    line_no,
                ));
            }
            let (line_no, line) = lines[0];
            let mut block = Self::new(spec.clone(), RepresentationMode::Line);
            block.read_line(line_no, line, parse_mode)?;
            Ok(block)
        }
    }

    /// Build a block from a single option line, rendered in block or line
    /// form. Blank lines around it are ignored; a second option line is a
    /// parse error.
    pub fn from_line(line: &str, spec: &OptionsSpec, block: bool) -> Result<Self> {
        let mut options = Self::new(spec.clone(), RepresentationMode::Line);
        let mut lines = line
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());
        if let Some((line_no, first)) = lines.next() {
            options.read_line(line_no, first, ParseMode::Strict)?;
        }
        if let Some((line_no, _)) = lines.next() {
            return Err(OptionBlockError::parse_error(
                "expected a single option line",
                line_no,
            ));
        }
        if block {
            options.set_mode(RepresentationMode::Block);
        }
        Ok(options)
    }

    fn parse_block(
        lines: &[(usize, &str)],
        spec: &OptionsSpec,
        parse_mode: ParseMode,
    ) -> Result<Self> {
        let mut block = Self::new(spec.clone(), RepresentationMode::Block);
        let mut iter = lines.iter();
        while let Some(&(line_no, line)) = iter.next() {
            if is_block_end(line) {
                if let Some(&(extra_no, _)) = iter.next() {
                    return Err(OptionBlockError::parse_error(
                        "unexpected text after END",
                        extra_no,
                    ));
                }
                return Ok(block);
            }
            if is_comment(line) {
                continue;
            }
            block.read_block_entry(line_no, line, parse_mode)?;
        }
        let last = lines.last().map(|(line_no, _)| *line_no).unwrap_or(1);
        Err(OptionBlockError::parse_error(
            "OPTIONS block is not terminated by END",
            last,
        ))
    }

    /// One option per block line: keyword followed by its sub-values.
    fn read_block_entry(&mut self, line_no: usize, line: &str, parse_mode: ParseMode) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let keyword = tokens[0];
        let Some(index) = self.spec.position(keyword) else {
            return self.keep_unrecognized(line_no, keyword, line.to_string(), parse_mode);
        };
        let option = self.spec.options()[index].clone();
        let rest = &tokens[1..];

        let used = match option.arity() {
            Arity::Flag => 0,
            Arity::Fixed(values) => {
                if rest.len() < values.len() {
                    return Err(missing_values(&option, rest.len(), line_no));
                }
                values.len()
            }
            Arity::Variadic(_) => {
                if rest.is_empty() {
                    return Err(missing_values(&option, 0, line_no));
                }
                rest.len()
            }
        };
        if rest.len() > used {
            let extra = rest[used..].join(" ");
            match parse_mode {
                ParseMode::Strict => {
                    return Err(OptionBlockError::parse_error(
                        format!("unexpected tokens after {}: '{}'", option.name(), extra),
                        line_no,
                    ));
                }
                ParseMode::Tolerant => {
                    warn!(
                        "{}: ignoring trailing tokens after {}: '{}'",
                        self.spec.package(),
                        option.name(),
                        extra
                    );
                }
            }
        }
        let values = coerce(&option, &rest[..used])?;
        self.store(index, values, line_no, parse_mode)
    }

    /// Options laid out on one line; sub-values follow their keyword.
    fn read_line(&mut self, line_no: usize, line: &str, parse_mode: ParseMode) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut pos = 0;
        while pos < tokens.len() {
            let keyword = tokens[pos];
            let Some(index) = self.spec.position(keyword) else {
                let end = self.next_keyword(&tokens, pos + 1);
                let entry = tokens[pos..end].join(" ");
                self.keep_unrecognized(line_no, keyword, entry, parse_mode)?;
                pos = end;
                continue;
            };
            pos += 1;
            let option = self.spec.options()[index].clone();
            let end = match option.arity() {
                Arity::Flag => pos,
                Arity::Fixed(values) => {
                    if pos + values.len() > tokens.len() {
                        return Err(missing_values(&option, tokens.len() - pos, line_no));
                    }
                    pos + values.len()
                }
                Arity::Variadic(_) => {
                    let end = self.next_keyword(&tokens, pos);
                    if end == pos {
                        return Err(missing_values(&option, 0, line_no));
                    }
                    end
                }
            };
            let values = coerce(&option, &tokens[pos..end])?;
            self.store(index, values, line_no, parse_mode)?;
            pos = end;
        }
        Ok(())
    }

    /// Index of the next token at or after `from` that names an option.
    fn next_keyword(&self, tokens: &[&str], from: usize) -> usize {
        (from..tokens.len())
            .find(|&i| self.spec.position(tokens[i]).is_some())
            .unwrap_or(tokens.len())
    }

    fn store(
        &mut self,
        index: usize,
        values: Vec<OptionValue>,
        line_no: usize,
        parse_mode: ParseMode,
    ) -> Result<()> {
        let name = self.spec.options()[index].name().to_string();
        let slot = &mut self.slots[index];
        if slot.enabled {
            match parse_mode {
                ParseMode::Strict => {
                    return Err(OptionBlockError::parse_error(
                        format!("option '{}' is given more than once", name),
                        line_no,
                    ));
                }
                ParseMode::Tolerant => {
                    warn!("{}: option '{}' repeated, keeping the last", self.spec.package(), name);
                }
            }
        }
        debug!("{}: read {} {:?}", self.spec.package(), name, values);
        slot.enabled = true;
        slot.values = values;
        Ok(())
    }

    fn keep_unrecognized(
        &mut self,
        line_no: usize,
        keyword: &str,
        entry: String,
        parse_mode: ParseMode,
    ) -> Result<()> {
        match parse_mode {
            ParseMode::Strict => Err(OptionBlockError::unknown_option(self.spec.package(), keyword)),
            ParseMode::Tolerant => {
                warn!(
                    "{}: keeping unrecognized option '{}' from line {}",
                    self.spec.package(),
                    entry,
                    line_no
                );
                self.unrecognized.push(entry);
                Ok(())
            }
        }
    }
}

fn missing_values(option: &OptionSpec, found: usize, line_no: usize) -> OptionBlockError {
    OptionBlockError::parse_error(
        format!(
            "option '{}' expects {}, found {}",
            option.name(),
            option.arity().describe(),
            found
        ),
        line_no,
    )
}

fn coerce(option: &OptionSpec, tokens: &[&str]) -> Result<Vec<OptionValue>> {
    tokens
        .iter()
        .enumerate()
        .filter_map(|(i, token)| {
            option
                .arity()
                .kind_at(i)
                .map(|kind| OptionValue::from_token(option.name(), token, kind))
        })
        .collect()
}

/// Pull the option block or option line off the top of a package file.
///
/// Leading blank and `#` comment lines are skipped. When the next line is
/// `OPTIONS`, everything through `END` is parsed; when its first word is an
/// option of `spec`, that line is parsed as an option line. Returns the
/// block, if any, and the text that follows it. Without options the input
/// comes back untouched.
pub fn split_options<'a>(
    text: &'a str,
    spec: &OptionsSpec,
    parse_mode: ParseMode,
) -> Result<(Option<OptionBlock>, &'a str)> {
    let mut offset = 0;
    let mut start: Option<usize> = None;
    let mut line_count = 0;

    for line in text.split_inclusive('\n') {
        line_count += 1;
        let trimmed = line.trim();
        match start {
            None => {
                if trimmed.is_empty() || is_comment(trimmed) {
                    offset += line.len();
                    continue;
                }
                if is_block_start(trimmed) {
                    start = Some(offset);
                } else {
                    let first_word = trimmed.split_whitespace().next().unwrap_or_default();
                    if spec.position(first_word).is_none() {
                        debug!("{}: no options at top of file", spec.package());
                        return Ok((None, text));
                    }
                    let end = offset + line.len();
                    let block = OptionBlock::parse_with(trimmed, spec, parse_mode)?;
                    return Ok((Some(block), &text[end..]));
                }
            }
            Some(begin) => {
                if is_block_end(trimmed) {
                    let end = offset + line.len();
                    let block = OptionBlock::parse_with(&text[begin..end], spec, parse_mode)?;
                    return Ok((Some(block), &text[end..]));
                }
            }
        }
        offset += line.len();
    }

    match start {
        None => Ok((None, text)),
        Some(_) => Err(OptionBlockError::parse_error(
            "OPTIONS block is not terminated by END",
            line_count,
        )),
    }
}
