//! Message parameters and printf-style substitution
//!
//! Log messages are templates such as `"%d y %d son %d"` filled from an
//! ordered list of [`Param`]s. Substitution never fails: a verb that does not
//! fit its argument, a missing argument or a surplus argument is rendered
//! inline (`%!d(string=x)`, `%!d(MISSING)`, `%!(EXTRA int=3)`) so that a
//! log call is never lost because of a sloppy template.

use std::fmt::{self, Write};

/// A single substitution parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    Nil,
}

impl Param {
    /// Capture any `Display` value as a string parameter
    pub fn display(value: impl fmt::Display) -> Self {
        Param::Str(value.to_string())
    }

    /// Capture any `Debug` value as a string parameter
    pub fn debug(value: impl fmt::Debug) -> Self {
        Param::Str(format!("{:?}", value))
    }

    fn type_name(&self) -> &'static str {
        match self {
            Param::Str(_) => "string",
            Param::Int(_) => "int",
            Param::UInt(_) => "uint",
            Param::Float(_) => "float64",
            Param::Bool(_) => "bool",
            Param::Char(_) => "int32",
            Param::Nil => "<nil>",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Str(s) => f.write_str(s),
            Param::Int(i) => write!(f, "{}", i),
            Param::UInt(u) => write!(f, "{}", u),
            Param::Float(x) => write_float_natural(f, *x),
            Param::Bool(b) => write!(f, "{}", b),
            Param::Char(c) => write!(f, "{}", c),
            Param::Nil => f.write_str("<nil>"),
        }
    }
}

macro_rules! impl_from_param {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Param {
                fn from(v: $t) -> Self {
                    Param::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from_param!(Int as i64: i8, i16, i32, i64, isize);
impl_from_param!(UInt as u64: u8, u16, u32, u64, usize);
impl_from_param!(Float as f64: f32, f64);

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Param::Bool(v)
    }
}

impl From<char> for Param {
    fn from(v: char) -> Self {
        Param::Char(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Str(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Str(v)
    }
}

impl From<&String> for Param {
    fn from(v: &String) -> Self {
        Param::Str(v.clone())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        v.map_or(Param::Nil, Into::into)
    }
}

/// Largest width or precision a template may ask for
const MAX_WIDTH: usize = 1_000_000;

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    minus: bool,
    plus: bool,
    zero: bool,
    space: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Substitute `params` into `format`.
///
/// With no params the template is returned untouched, so a literal `%` in
/// a plain message is never interpreted.
pub fn sprintf(format: &str, params: &[Param]) -> String {
    if params.is_empty() {
        return format.to_string();
    }
    let mut out = String::with_capacity(format.len() + 8 * params.len());
    // Writing into a String cannot fail.
    let _ = write_sprintf(&mut out, format, params);
    out
}

/// Streaming form of [`sprintf`]. Always substitutes, even with no params.
pub fn write_sprintf<W: Write>(out: &mut W, format: &str, params: &[Param]) -> fmt::Result {
    let mut args = params.iter();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.write_char(c)?;
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.minus = true,
                '+' => spec.plus = true,
                '0' => spec.zero = true,
                ' ' => spec.space = true,
                '#' => spec.sharp = true,
                _ => break,
            }
            chars.next();
        }
        spec.width = take_number(&mut chars);
        if spec.width.is_some_and(|w| w > MAX_WIDTH) {
            out.write_str("%!(BADWIDTH)")?;
            spec.width = None;
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            spec.precision = Some(take_number(&mut chars).unwrap_or(0));
            if spec.precision.is_some_and(|p| p > MAX_WIDTH) {
                out.write_str("%!(BADPREC)")?;
                spec.precision = None;
            }
        }

        let Some(verb) = chars.next() else {
            out.write_str("%!(NOVERB)")?;
            break;
        };
        if verb == '%' {
            out.write_char('%')?;
            continue;
        }
        match args.next() {
            Some(arg) => write_arg(out, verb, &spec, arg)?,
            None => write!(out, "%!{}(MISSING)", verb)?,
        }
    }

    let mut extra = args.peekable();
    if extra.peek().is_some() {
        out.write_str("%!(EXTRA ")?;
        for (i, arg) in extra.enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            write!(out, "{}={}", arg.type_name(), arg)?;
        }
        out.write_char(')')?;
    }
    Ok(())
}

fn take_number<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
        chars.next();
    }
    value
}

fn write_arg<W: Write>(out: &mut W, verb: char, spec: &Spec, arg: &Param) -> fmt::Result {
    match (verb, arg) {
        ('v', Param::Int(_) | Param::UInt(_)) => write_arg(out, 'd', spec, arg),
        ('v', Param::Float(_)) => write_arg(out, 'g', spec, arg),
        ('v' | 's', Param::Str(s)) => pad(out, spec, truncate(s, spec.precision)),
        ('v' | 's', other) => pad(out, spec, &other.to_string()),

        ('d', Param::Int(i)) => pad_number(out, spec, *i < 0, &i.unsigned_abs().to_string()),
        ('d', Param::UInt(u)) => pad_number(out, spec, false, &u.to_string()),
        ('d', Param::Char(c)) => pad_number(out, spec, false, &(*c as u32).to_string()),

        ('x' | 'X' | 'o' | 'b', Param::Int(i)) => {
            pad_number(out, spec, *i < 0, &radix(i.unsigned_abs(), verb, spec.sharp))
        }
        ('x' | 'X' | 'o' | 'b', Param::UInt(u)) => {
            pad_number(out, spec, false, &radix(*u, verb, spec.sharp))
        }
        ('x' | 'X', Param::Str(s)) => {
            let mut hex = String::with_capacity(s.len() * 2);
            for byte in s.bytes() {
                if verb == 'x' {
                    write!(hex, "{:02x}", byte)?;
                } else {
                    write!(hex, "{:02X}", byte)?;
                }
            }
            pad(out, spec, &hex)
        }

        ('f' | 'F', Param::Float(x)) => {
            let precision = spec.precision.unwrap_or(6);
            if x.is_finite() {
                pad_number(out, spec, x.is_sign_negative(), &format!("{:.*}", precision, x.abs()))
            } else {
                pad(out, spec, &non_finite(*x))
            }
        }
        ('g', Param::Float(x)) => {
            if !x.is_finite() {
                return pad(out, spec, &non_finite(*x));
            }
            let digits = match spec.precision {
                Some(p) => significant(x.abs(), p),
                None => {
                    let mut s = String::new();
                    write_float_natural(&mut s, x.abs())?;
                    s
                }
            };
            pad_number(out, spec, x.is_sign_negative(), &digits)
        }

        ('q', Param::Str(s)) => pad(out, spec, &format!("{:?}", truncate(s, spec.precision))),
        ('q', Param::Char(c)) => pad(out, spec, &format!("{:?}", c)),
        ('q', Param::Int(i)) if (0..=u32::MAX as i64).contains(i) => {
            pad(out, spec, &format!("{:?}", to_char(*i as u32)))
        }

        ('t', Param::Bool(b)) => pad(out, spec, if *b { "true" } else { "false" }),

        ('c', Param::Char(c)) => pad(out, spec, c.encode_utf8(&mut [0; 4])),
        ('c', Param::Int(i)) if (0..=u32::MAX as i64).contains(i) => {
            pad(out, spec, to_char(*i as u32).encode_utf8(&mut [0; 4]))
        }
        ('c', Param::UInt(u)) if *u <= u32::MAX as u64 => {
            pad(out, spec, to_char(*u as u32).encode_utf8(&mut [0; 4]))
        }

        _ => write!(out, "%!{}({}={})", verb, arg.type_name(), arg),
    }
}

fn write_float_natural<W: Write>(out: &mut W, x: f64) -> fmt::Result {
    if x.is_finite() {
        write!(out, "{}", x)
    } else {
        out.write_str(&non_finite(x))
    }
}

/// `%g` with a precision: `digits` significant digits, in exponent form
/// when the exponent is below -4 or not below `digits`. Trailing zeros go.
fn significant(x: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if x == 0.0 {
        return "0".to_string();
    }

    // Rounding to `digits` first fixes the exponent (9.99 at 2 digits is 1.0e1).
    let sci = format!("{:.*e}", digits - 1, x);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i64 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= digits as i64 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.unsigned_abs())
    } else {
        let decimals = (digits as i64 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn non_finite(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_sign_negative() {
        "-Inf".to_string()
    } else {
        "+Inf".to_string()
    }
}

fn to_char(code: u32) -> char {
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn radix(value: u64, verb: char, sharp: bool) -> String {
    match (verb, sharp) {
        ('x', false) => format!("{:x}", value),
        ('x', true) => format!("{:#x}", value),
        ('X', false) => format!("{:X}", value),
        ('X', true) => format!("0X{:X}", value),
        ('o', false) => format!("{:o}", value),
        ('o', true) => format!("0{:o}", value),
        (_, false) => format!("{:b}", value),
        (_, true) => format!("{:#b}", value),
    }
}

fn truncate(s: &str, precision: Option<usize>) -> &str {
    match precision.and_then(|p| s.char_indices().nth(p)) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn pad<W: Write>(out: &mut W, spec: &Spec, body: &str) -> fmt::Result {
    let fill = spec
        .width
        .map_or(0, |w| w.saturating_sub(body.chars().count()));
    if spec.minus {
        out.write_str(body)?;
        write_repeated(out, ' ', fill)
    } else {
        write_repeated(out, ' ', fill)?;
        out.write_str(body)
    }
}

fn pad_number<W: Write>(out: &mut W, spec: &Spec, negative: bool, digits: &str) -> fmt::Result {
    let sign = if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    };
    let len = sign.len() + digits.chars().count();
    let fill = spec.width.map_or(0, |w| w.saturating_sub(len));

    if spec.minus {
        out.write_str(sign)?;
        out.write_str(digits)?;
        write_repeated(out, ' ', fill)
    } else if spec.zero {
        out.write_str(sign)?;
        write_repeated(out, '0', fill)?;
        out.write_str(digits)
    } else {
        write_repeated(out, ' ', fill)?;
        out.write_str(sign)?;
        out.write_str(digits)
    }
}

fn write_repeated<W: Write>(out: &mut W, c: char, n: usize) -> fmt::Result {
    for _ in 0..n {
        out.write_char(c)?;
    }
    Ok(())
}
