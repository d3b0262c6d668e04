//! Option store: pending token buffer plus Parse/Bind.

use serde::Serialize;

use crate::options::descriptor::{Arity, OptionDescriptor, OptionGroup};
use crate::options::error::OptionError;
use crate::options::token::{self, FlagToken};

/// Introspection record for a registered option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionInfo {
    pub name: String,
    pub short_name: Option<char>,
    /// Name of the group that declared the option.
    pub group: String,
    pub arity: Arity,
    pub type_name: &'static str,
    pub help: String,
    /// Set once a matching flag is found; never reset.
    pub supplied: bool,
    /// Raw value tokens consumed, across all occurrences.
    pub values: Vec<String>,
}

impl OptionInfo {
    fn matches(&self, flag: &FlagToken<'_>) -> bool {
        if flag.short {
            let mut chars = flag.name.chars();
            self.short_name.is_some() && chars.next() == self.short_name && chars.next().is_none()
        } else {
            self.name == flag.name
        }
    }
}

/// Accumulates raw tokens and resolves them against declared options.
///
/// Tokens are appended from one or more sources (the current invocation,
/// then a model header) and stay pending until an [`OptionGroup`] that
/// declares them is parsed. Unmatched tokens are kept for later groups.
#[derive(Debug, Clone, Default)]
pub struct OptionStore {
    pending: Vec<String>,
    options: Vec<OptionInfo>,
}

impl OptionStore {
    /// Create a store seeded with the current invocation's tokens.
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            pending: tokens,
            options: Vec::new(),
        }
    }

    /// Append tokens after everything already pending.
    pub fn append_tokens<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending.extend(tokens.into_iter().map(Into::into));
    }

    /// Tokens not yet claimed by any declared option.
    pub fn pending_tokens(&self) -> &[String] {
        &self.pending
    }

    /// Every option registered so far, in registration order.
    pub fn get_all_options(&self) -> &[OptionInfo] {
        &self.options
    }

    /// Look up a registered option by long name or short alias.
    pub fn option(&self, name: &str) -> Option<&OptionInfo> {
        let mut chars = name.chars();
        let short = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };
        self.options
            .iter()
            .find(|o| o.name == name)
            .or_else(|| short.and_then(|c| self.options.iter().find(|o| o.short_name == Some(c))))
    }

    /// Whether a flag for `name` was found in the buffer.
    ///
    /// Unknown names report `false`.
    pub fn was_supplied(&self, name: &str) -> bool {
        self.option(name).is_some_and(|o| o.supplied)
    }

    /// Register a group and resolve pending tokens against it.
    ///
    /// Bound storage is written before this returns; the group's borrows end
    /// here. On error the pending buffer and every registered option are left
    /// as they were, though the group's own storage may be partly written.
    pub fn add_and_parse(&mut self, group: OptionGroup<'_>) -> Result<(), OptionError> {
        let (group_name, mut descriptors) = group.into_parts();
        self.check_unique(&descriptors)?;

        let base = self.options.len();
        self.options.extend(descriptors.iter().map(|d| OptionInfo {
            name: d.name.clone(),
            short_name: d.short_name,
            group: group_name.clone(),
            arity: d.binding.arity(),
            type_name: d.binding.type_name(),
            help: d.help.clone(),
            supplied: false,
            values: Vec::new(),
        }));

        let registered = self.options[..base].to_vec();
        let pending = std::mem::take(&mut self.pending);
        match self.resolve(&pending, base, &mut descriptors) {
            Ok(remaining) => self.pending = remaining,
            Err(err) => {
                self.options = registered;
                self.pending = pending;
                return Err(err);
            }
        }

        for (offset, descriptor) in descriptors.iter_mut().enumerate() {
            if !self.options[base + offset].supplied {
                descriptor.binding.apply_default();
            }
        }

        tracing::debug!(
            group = %group_name,
            declared = descriptors.len(),
            pending = self.pending.len(),
            "Parsed option group"
        );
        Ok(())
    }

    /// Final validation pass: fail on the first flag nobody declared.
    pub fn check_unregistered(&self) -> Result<(), OptionError> {
        match self.pending.iter().find(|t| token::is_flag(t)) {
            Some(token) => Err(OptionError::UnknownFlag {
                token: token.clone(),
            }),
            None => Ok(()),
        }
    }

    fn check_unique(&self, descriptors: &[OptionDescriptor<'_>]) -> Result<(), OptionError> {
        let registered = self.options.iter().map(|o| (o.name.as_str(), o.short_name));
        for (i, d) in descriptors.iter().enumerate() {
            let earlier = descriptors[..i].iter().map(|e| (e.name.as_str(), e.short_name));
            for (name, short) in registered.clone().chain(earlier) {
                if let Some(taken) = name_clash((d.name.as_str(), d.short_name), (name, short)) {
                    return Err(OptionError::DuplicateOption { name: taken });
                }
            }
        }
        Ok(())
    }

    /// Scan `pending` left to right, binding matches; returns the leftovers.
    fn resolve(
        &mut self,
        pending: &[String],
        base: usize,
        descriptors: &mut [OptionDescriptor<'_>],
    ) -> Result<Vec<String>, OptionError> {
        let mut remaining = Vec::with_capacity(pending.len());
        let mut i = 0;

        while i < pending.len() {
            let token = &pending[i];
            let matched = token::parse_flag(token).and_then(|flag| {
                let idx = self.options.iter().position(|o| o.matches(&flag))?;
                Some((flag, idx))
            });
            let Some((flag, idx)) = matched else {
                remaining.push(token.clone());
                i += 1;
                continue;
            };

            let (values, next) = take_values(pending, i, &flag, &self.options[idx])?;
            let info = &mut self.options[idx];

            if idx >= base {
                let binding = &mut descriptors[idx - base].binding;
                binding
                    .store(&values, !info.supplied)
                    .map_err(|bad| OptionError::TypeMismatch {
                        option: info.name.clone(),
                        token: bad.to_string(),
                        expected: binding.type_name(),
                    })?;
                if info.supplied && info.arity != Arity::Multi {
                    tracing::debug!(option = %info.name, "Repeated option, keeping first value");
                }
            } else {
                tracing::warn!(
                    option = %info.name,
                    group = %info.group,
                    "Option appeared after its group was parsed; values recorded but not bound"
                );
            }

            tracing::trace!(option = %info.name, values = ?values, "Bound option");
            info.supplied = true;
            info.values.extend(values);
            i = next;
        }

        Ok(remaining)
    }
}

/// The name two options would both answer to, if any.
///
/// A one-character long name collides with the same short alias.
fn name_clash(a: (&str, Option<char>), b: (&str, Option<char>)) -> Option<String> {
    let as_short = |name: &str| {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    };

    if a.0 == b.0 {
        return Some(a.0.to_string());
    }
    [(a.1, b.1), (a.1, as_short(b.0)), (as_short(a.0), b.1)]
        .into_iter()
        .find_map(|pair| match pair {
            (Some(x), Some(y)) if x == y => Some(x.to_string()),
            _ => None,
        })
}

/// Collect the value tokens for the flag at `pending[at]`.
///
/// Returns the values and the index of the first token after them.
fn take_values(
    pending: &[String],
    at: usize,
    flag: &FlagToken<'_>,
    info: &OptionInfo,
) -> Result<(Vec<String>, usize), OptionError> {
    let mut values: Vec<String> = flag.inline_value.map(str::to_string).into_iter().collect();
    let mut next = at + 1;

    let value_at = |idx: usize| pending.get(idx).filter(|t| !token::is_flag(t));

    match info.arity {
        Arity::Switch => {}
        Arity::Single | Arity::Multi if values.is_empty() => match value_at(next) {
            Some(value) => {
                values.push(value.clone());
                next += 1;
            }
            None => {
                return Err(OptionError::MissingValue {
                    option: info.name.clone(),
                    expected: info.type_name,
                })
            }
        },
        Arity::Single | Arity::Multi => {}
    }

    if info.arity == Arity::Multi {
        while let Some(value) = value_at(next) {
            values.push(value.clone());
            next += 1;
        }
    }

    Ok((values, next))
}
