//! Option descriptors: typed options bound to caller-owned storage.

use serde::Serialize;

/// How many value tokens an option takes per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// Presence alone sets the option (e.g., `--quiet`).
    Switch,
    /// Exactly one value (e.g., `--epsilon 0.2`).
    Single,
    /// One or more values, repeatable and accumulating (e.g., `-q ab -q cd`).
    Multi,
}

/// A single value coerced from one token.
pub trait ScalarValue: Sized {
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;

    fn coerce(token: &str) -> Option<Self>;
}

macro_rules! scalar_from_str {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl ScalarValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn coerce(token: &str) -> Option<Self> {
                    token.parse().ok()
                }
            }
        )*
    };
}

scalar_from_str! {
    i32 => "i32",
    i64 => "i64",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
}

impl ScalarValue for String {
    const TYPE_NAME: &'static str = "string";

    fn coerce(token: &str) -> Option<Self> {
        Some(token.to_string())
    }
}

impl ScalarValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn coerce(token: &str) -> Option<Self> {
        match token {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

/// A storage type an option can be bound to.
///
/// The arity of an option follows from its storage type: `bool` is a switch,
/// other scalars take one value, and `Vec<T>` takes one or more per occurrence.
pub trait OptionValue: Sized {
    const ARITY: Arity;
    const TYPE_NAME: &'static str;

    /// Apply one occurrence's value tokens to the storage.
    ///
    /// `first` is set for the first occurrence in the buffer. On failure the
    /// offending token is returned.
    fn store<'t>(&mut self, values: &'t [String], first: bool) -> Result<(), &'t str>;

    /// Value written when the option is absent and no default was given.
    fn implicit_default() -> Option<Self> {
        None
    }
}

impl OptionValue for bool {
    const ARITY: Arity = Arity::Switch;
    const TYPE_NAME: &'static str = "bool";

    fn store<'t>(&mut self, values: &'t [String], first: bool) -> Result<(), &'t str> {
        let value = match values.first() {
            Some(token) => bool::coerce(token).ok_or(token.as_str())?,
            None => true,
        };
        if first {
            *self = value;
        }
        Ok(())
    }

    fn implicit_default() -> Option<Self> {
        Some(false)
    }
}

macro_rules! single_valued {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OptionValue for $ty {
                const ARITY: Arity = Arity::Single;
                const TYPE_NAME: &'static str = <$ty as ScalarValue>::TYPE_NAME;

                fn store<'t>(&mut self, values: &'t [String], first: bool) -> Result<(), &'t str> {
                    let token = values.first().map(String::as_str).unwrap_or_default();
                    let value = <$ty as ScalarValue>::coerce(token).ok_or(token)?;
                    if first {
                        *self = value;
                    }
                    Ok(())
                }
            }
        )*
    };
}

single_valued!(i32, i64, u32, u64, usize, f32, f64, String);

impl<T: ScalarValue> OptionValue for Vec<T> {
    const ARITY: Arity = Arity::Multi;
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn store<'t>(&mut self, values: &'t [String], first: bool) -> Result<(), &'t str> {
        let coerced = values
            .iter()
            .map(|token| T::coerce(token).ok_or(token.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        if first {
            self.clear();
        }
        self.extend(coerced);
        Ok(())
    }
}

/// Type-erased view of a bound option, used by the store during Parse/Bind.
pub(crate) trait Binding {
    fn arity(&self) -> Arity;
    fn type_name(&self) -> &'static str;
    fn store<'t>(&mut self, values: &'t [String], first: bool) -> Result<(), &'t str>;
    fn apply_default(&mut self);
}

struct Slot<'a, T> {
    storage: &'a mut T,
    default: Option<T>,
}

impl<T: OptionValue> Binding for Slot<'_, T> {
    fn arity(&self) -> Arity {
        T::ARITY
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn store<'t>(&mut self, values: &'t [String], first: bool) -> Result<(), &'t str> {
        self.storage.store(values, first)
    }

    fn apply_default(&mut self) {
        if let Some(value) = self.default.take().or_else(T::implicit_default) {
            *self.storage = value;
        }
    }
}

/// An option under construction, bound to `storage` for one parse call.
pub struct TypedOption<'a, T> {
    name: String,
    short_name: Option<char>,
    help: String,
    storage: &'a mut T,
    default: Option<T>,
}

/// Declare an option named `name` bound to `storage`.
pub fn make_option<'a, T: OptionValue>(name: impl Into<String>, storage: &'a mut T) -> TypedOption<'a, T> {
    TypedOption {
        name: name.into(),
        short_name: None,
        help: String::new(),
        storage,
        default: None,
    }
}

impl<'a, T: OptionValue> TypedOption<'a, T> {
    /// Value written into storage when the option is not supplied.
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Single-character alias matched by `-c` tokens.
    pub fn short_name(mut self, short: char) -> Self {
        self.short_name = Some(short);
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }
}

/// A declared option with its binding erased.
pub(crate) struct OptionDescriptor<'a> {
    pub(crate) name: String,
    pub(crate) short_name: Option<char>,
    pub(crate) help: String,
    pub(crate) binding: Box<dyn Binding + 'a>,
}

/// An ordered, named collection of options declared together.
///
/// A group is consumed by [`OptionStore::add_and_parse`](crate::options::OptionStore::add_and_parse);
/// the storage borrows end with that call.
pub struct OptionGroup<'a> {
    name: String,
    descriptors: Vec<OptionDescriptor<'a>>,
}

impl<'a> OptionGroup<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptors: Vec::new(),
        }
    }

    /// Append an option to the group.
    ///
    /// Name clashes are reported when the group is parsed.
    pub fn add<T: OptionValue + 'a>(&mut self, option: TypedOption<'a, T>) -> &mut Self {
        let TypedOption {
            name,
            short_name,
            help,
            storage,
            default,
        } = option;
        self.descriptors.push(OptionDescriptor {
            name,
            short_name,
            help,
            binding: Box::new(Slot { storage, default }),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub(crate) fn into_parts(self) -> (String, Vec<OptionDescriptor<'a>>) {
        (self.name, self.descriptors)
    }
}
