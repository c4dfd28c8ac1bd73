//! printf-style formatting into a [`Sink`].
//!
//! A format string is scanned byte by byte. Literal runs are copied to the sink, and
//! each specifier of the form `%[flags][width][.precision][length]conversion` consumes
//! the next [`Arg`]. `%f` is rendered by the correctly rounded conversion
//! [`to_decimal_digits`](crate::to_decimal_digits), so its digits are exact for any precision.

use crate::defs::Error;
use crate::defs::DEFAULT_PRECISION;
use crate::dtoa::to_decimal_digits;
use crate::sink::Sink;
use crate::sink::SliceSink;
use core::slice::Iter;

#[cfg(feature = "std")]
use crate::sink::Console;

/// Argument of a formatting call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    /// Character, for `%c`.
    Char(char),
    /// Signed integer, for `%d` and `%i`; its bits for unsigned conversions.
    Int(i64),
    /// Unsigned integer, for `%u`, `%o`, `%x`, `%X`, and `%d`.
    UInt(u64),
    /// Double, for `%f` and `%F`.
    Float(f64),
    /// String, for `%s`.
    Str(&'a str),
    /// Pointer address, for `%p`.
    Ptr(usize),
}

macro_rules! impl_arg_from {
    ($($t:ty => $v:ident as $c:ty),*) => {
        $(
            impl From<$t> for Arg<'_> {
                #[allow(clippy::unnecessary_cast)]
                fn from(v: $t) -> Self {
                    Arg::$v(v as $c)
                }
            }
        )*
    };
}

impl_arg_from!(
    i8 => Int as i64, i16 => Int as i64, i32 => Int as i64, i64 => Int as i64, isize => Int as i64,
    u8 => UInt as u64, u16 => UInt as u64, u32 => UInt as u64, u64 => UInt as u64, usize => UInt as u64,
    f32 => Float as f64, f64 => Float as f64
);

impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Arg::Char(c)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s)
    }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(p: *const T) -> Self {
        Arg::Ptr(p as usize)
    }
}

impl<T> From<*mut T> for Arg<'_> {
    fn from(p: *mut T) -> Self {
        Arg::Ptr(p as usize)
    }
}

/// Parsed conversion specification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Spec {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
    width: usize,
    precision: Option<usize>,
    conv: u8,
}

impl Spec {
    // Parses the specification following a '%', returns it and the number of bytes consumed.
    fn parse(s: &[u8]) -> Result<(Self, usize), Error> {
        let mut spec = Spec::default();
        let mut i = 0;

        while let Some(&c) = s.get(i) {
            match c {
                b'-' => spec.left = true,
                b'+' => spec.plus = true,
                b' ' => spec.space = true,
                b'0' => spec.zero = true,
                b'#' => spec.alt = true,
                _ => break,
            }
            i += 1;
        }

        let (width, n) = parse_number(&s[i..])?;
        spec.width = width;
        i += n;

        if s.get(i) == Some(&b'.') {
            i += 1;
            let (precision, n) = parse_number(&s[i..])?;
            spec.precision = Some(precision);
            i += n;
        }

        // argument width is carried by Arg
        while let Some(b'h' | b'l' | b'z') = s.get(i) {
            i += 1;
        }

        match s.get(i) {
            Some(&c) => {
                spec.conv = c;
                Ok((spec, i + 1))
            }
            None => Err(Error::InvalidFormatSpecifier),
        }
    }
}

fn parse_number(s: &[u8]) -> Result<(usize, usize), Error> {
    let mut v: usize = 0;
    let mut n = 0;

    for &c in s.iter().take_while(|c| c.is_ascii_digit()) {
        v = v
            .checked_mul(10)
            .and_then(|v| v.checked_add((c - b'0') as usize))
            .ok_or(Error::InvalidFormatSpecifier)?;
        n += 1;
    }

    Ok((v, n))
}

// Counts the bytes passed to the wrapped sink.
struct Counter<'s, S: Sink + ?Sized> {
    sink: &'s mut S,
    count: usize,
}

impl<S: Sink + ?Sized> Sink for Counter<'_, S> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.sink.write(bytes)?;
        self.count += bytes.len();
        Ok(())
    }
}

fn write_repeat<S: Sink + ?Sized>(sink: &mut S, c: u8, mut n: usize) -> Result<(), Error> {
    let chunk = [c; 32];
    while n > 0 {
        let k = n.min(chunk.len());
        sink.write(&chunk[..k])?;
        n -= k;
    }
    Ok(())
}

// Writes prefix and body padded to the field width. `zero_pad` puts zeros between them.
fn write_field<S: Sink + ?Sized>(
    sink: &mut S,
    spec: &Spec,
    zero_pad: bool,
    prefix: &[u8],
    body: &[&[u8]],
) -> Result<(), Error> {
    let len = prefix.len() + body.iter().map(|b| b.len()).sum::<usize>();
    let pad = spec.width.saturating_sub(len);

    if !spec.left && !zero_pad {
        write_repeat(sink, b' ', pad)?;
    }

    sink.write(prefix)?;

    if !spec.left && zero_pad {
        write_repeat(sink, b'0', pad)?;
    }

    for b in body {
        sink.write(b)?;
    }

    if spec.left {
        write_repeat(sink, b' ', pad)?;
    }

    Ok(())
}

fn sign_prefix(spec: &Spec, negative: bool) -> &'static [u8] {
    if negative {
        b"-"
    } else if spec.plus {
        b"+"
    } else if spec.space {
        b" "
    } else {
        b""
    }
}

// Writes the digits of `v` in `radix` to the end of `buf`, returns the start index.
fn render_unsigned(mut v: u64, radix: u64, upper: bool, buf: &mut [u8; 24]) -> usize {
    let digits = if upper { b"0123456789ABCDEF" } else { b"0123456789abcdef" };
    let mut i = buf.len();

    loop {
        i -= 1;
        buf[i] = digits[(v % radix) as usize];
        v /= radix;
        if v == 0 {
            break;
        }
    }

    i
}

fn write_integer<S: Sink + ?Sized>(
    sink: &mut S,
    spec: &Spec,
    negative: bool,
    magnitude: u64,
) -> Result<(), Error> {
    let (radix, upper) = match spec.conv {
        b'o' => (8, false),
        b'x' | b'p' => (16, false),
        b'X' => (16, true),
        _ => (10, false),
    };

    let mut buf = [0u8; 24];
    let start = render_unsigned(magnitude, radix, upper, &mut buf);
    let mut digits = &buf[start..];

    if spec.precision == Some(0) && magnitude == 0 {
        digits = &[];
    }

    let mut min_digits = spec.precision.unwrap_or(0);

    let prefix: &[u8] = match spec.conv {
        b'd' | b'i' => sign_prefix(spec, negative),
        b'x' if spec.alt && magnitude != 0 => b"0x",
        b'X' if spec.alt && magnitude != 0 => b"0X",
        b'o' if spec.alt && digits.first() != Some(&b'0') => {
            min_digits = min_digits.max(digits.len() + 1);
            b""
        }
        b'p' => {
            min_digits = 2 * core::mem::size_of::<usize>();
            b""
        }
        _ => b"",
    };

    let leading_zeros = min_digits.saturating_sub(digits.len());
    let len = prefix.len() + leading_zeros + digits.len();
    let pad = spec.width.saturating_sub(len);

    // the zero flag is ignored when a precision is given
    let zero_pad = spec.zero && !spec.left && spec.precision.is_none();

    if !spec.left && !zero_pad {
        write_repeat(sink, b' ', pad)?;
    }

    sink.write(prefix)?;

    if zero_pad {
        write_repeat(sink, b'0', pad)?;
    }

    write_repeat(sink, b'0', leading_zeros)?;
    sink.write(digits)?;

    if spec.left {
        write_repeat(sink, b' ', pad)?;
    }

    Ok(())
}

fn write_float<S: Sink + ?Sized>(sink: &mut S, spec: &Spec, value: f64) -> Result<(), Error> {
    let precision = spec.precision.unwrap_or(DEFAULT_PRECISION);
    let d = to_decimal_digits(value, precision)?;
    let prefix = sign_prefix(spec, d.is_negative());

    match d.token() {
        Some(t) => {
            let t: &[u8] = match (spec.conv, t) {
                (b'F', "inf") => b"INF",
                (b'F', "qNaN") => b"QNAN",
                (b'F', _) => b"SNAN",
                _ => t.as_bytes(),
            };
            write_field(sink, spec, false, prefix, &[t])
        }
        None => {
            let point: &[u8] = if precision > 0 || spec.alt { b"." } else { b"" };
            write_field(sink, spec, spec.zero, prefix, &[d.integer(), point, d.fraction()])
        }
    }
}

fn write_str<S: Sink + ?Sized>(sink: &mut S, spec: &Spec, s: &str) -> Result<(), Error> {
    let mut end = spec.precision.map_or(s.len(), |p| p.min(s.len()));
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    write_field(sink, spec, false, b"", &[&s.as_bytes()[..end]])
}

fn write_arg<S: Sink + ?Sized>(sink: &mut S, spec: &Spec, arg: &Arg) -> Result<(), Error> {
    match (spec.conv, *arg) {
        (b'c', Arg::Char(c)) => {
            let mut buf = [0u8; 4];
            let s = c.encode_utf8(&mut buf);
            write_field(sink, spec, false, b"", &[s.as_bytes()])
        }
        (b'd' | b'i', Arg::Int(v)) => write_integer(sink, spec, v < 0, v.unsigned_abs()),
        (b'd' | b'i', Arg::UInt(v)) => write_integer(sink, spec, false, v),
        (b'u' | b'o' | b'x' | b'X', Arg::Int(v)) => write_integer(sink, spec, false, v as u64),
        (b'u' | b'o' | b'x' | b'X', Arg::UInt(v)) => write_integer(sink, spec, false, v),
        (b'p', Arg::Ptr(p)) => write_integer(sink, spec, false, p as u64),
        (b'f' | b'F', Arg::Float(v)) => write_float(sink, spec, v),
        (b's', Arg::Str(s)) => write_str(sink, spec, s),
        _ => {
            tracing::debug!(conv = %char::from(spec.conv), arg = ?arg, "argument does not match conversion");
            Err(Error::ArgumentMismatch)
        }
    }
}

fn is_conversion(c: u8) -> bool {
    matches!(c, b'c' | b'd' | b'i' | b'u' | b'o' | b'x' | b'X' | b'p' | b's' | b'f' | b'F')
}

fn scan<S: Sink + ?Sized>(sink: &mut S, fmt: &str, args: &mut Iter<Arg>) -> Result<(), Error> {
    let fmt = fmt.as_bytes();
    let mut i = 0;

    while i < fmt.len() {
        let lit_end = fmt[i..].iter().position(|&c| c == b'%').map_or(fmt.len(), |p| i + p);
        if lit_end > i {
            sink.write(&fmt[i..lit_end])?;
            i = lit_end;
            continue;
        }

        let (spec, n) = Spec::parse(&fmt[i + 1..]).map_err(|e| {
            tracing::debug!(position = i, "incomplete format specifier");
            e
        })?;

        // a literal percent takes no argument; flags and width are ignored
        if spec.conv == b'%' {
            sink.write(b"%")?;
            i += 1 + n;
            continue;
        }

        if !is_conversion(spec.conv) {
            tracing::debug!(position = i, conv = %char::from(spec.conv), "unknown conversion");
            return Err(Error::InvalidFormatSpecifier);
        }

        let arg = args.next().ok_or_else(|| {
            tracing::debug!(position = i, "not enough arguments");
            Error::MissingArgument
        })?;

        write_arg(sink, &spec, arg)?;

        i += 1 + n;
    }

    Ok(())
}

/// Formats `args` according to `fmt` and writes the result to `sink`.
/// Returns the number of bytes written.
///
/// Supported conversions are `%%`, `c`, `d`, `i`, `u`, `o`, `x`, `X`, `p`, `s`, `f`, and
/// `F`, with flags `-`, `+`, space, `0`, `#`, a field width, and a precision. Length
/// modifiers `h`, `l`, and `z` are accepted and ignored. Flags and width given to `%%`
/// (as in `%5%`) are ignored, so it always prints a single `%`. Arguments left over after
/// the format string is exhausted are ignored.
///
/// Output reaches `sink` in several writes. On error the bytes written before the
/// failure stay in the sink; format into a scratch buffer first if that matters.
///
/// ## Errors
///
///  - InvalidFormatSpecifier: unknown conversion or a truncated specifier.
///  - ArgumentMismatch: argument kind does not fit the conversion.
///  - MissingArgument: fewer arguments than specifiers.
///  - Any error returned by `sink` or by the double conversion.
pub fn write_formatted<S: Sink + ?Sized>(sink: &mut S, fmt: &str, args: &[Arg]) -> Result<usize, Error> {
    let mut counter = Counter { sink, count: 0 };
    scan(&mut counter, fmt, &mut args.iter())?;
    Ok(counter.count)
}

/// Formats into `buf`, returns the number of bytes written.
/// On error `buf` may hold a prefix of the output.
pub fn format_to_slice(buf: &mut [u8], fmt: &str, args: &[Arg]) -> Result<usize, Error> {
    let mut sink = SliceSink::new(buf);
    write_formatted(&mut sink, fmt, args)
}

/// Formats and writes the result to the standard output in a single write.
#[cfg(feature = "std")]
pub fn print(fmt: &str, args: &[Arg]) -> Result<usize, Error> {
    let mut buf = Vec::new();
    let n = write_formatted(&mut buf, fmt, args)?;
    Console::stdout().write(&buf)?;
    Ok(n)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::{string::String, vec::Vec};

    fn f(fmt: &str, args: &[Arg]) -> String {
        let mut s = String::new();
        let n = write_formatted(&mut s, fmt, args).unwrap();
        assert_eq!(n, s.len());
        s
    }

    #[test]
    fn test_conversions() {
        assert_eq!(f("%% Hello, world! %%\n", &[]), "% Hello, world! %\n");
        assert_eq!(f("[%5%|%-3%|%l%]", &[]), "[%|%|%]");
        assert_eq!(f("%5%%d", &[7.into()]), "%7");
        assert_eq!(f("%c %c %c", &['a'.into(), 'b'.into(), 'ж'.into()]), "a b ж");
        assert_eq!(f("%d %i %d", &[0.into(), (-1).into(), 1234.into()]), "0 -1 1234");
        assert_eq!(
            f("%f %f %f", &[0.0.into(), (-1.0).into(), 1.234.into()]),
            "0.000000 -1.000000 1.234000"
        );
        assert_eq!(f("%o %o %o", &[0u32.into(), 8u32.into(), 16u32.into()]), "0 10 20");
        assert_eq!(f("%s %s %s", &["abc".into(), "def".into(), "ghi".into()]), "abc def ghi");
        assert_eq!(
            f("%u %u %u", &[0u32.into(), (-1).into(), 1234u32.into()]),
            "0 18446744073709551615 1234"
        );
        assert_eq!(
            f("%x %X %x", &[0u32.into(), (-1).into(), 255u32.into()]),
            "0 FFFFFFFFFFFFFFFF ff"
        );
        assert_eq!(f("%d", &[u64::MAX.into()]), "18446744073709551615");
        assert_eq!(f("%d", &[i64::MIN.into()]), "-9223372036854775808");
        assert_eq!(f("%lld %zu %hhx", &[1.into(), 2usize.into(), 0xAu8.into()]), "1 2 a");
    }

    #[test]
    fn test_pointer() {
        let w = 2 * core::mem::size_of::<usize>();

        let s = f("%p", &[Arg::Ptr(0)]);
        assert_eq!(s.len(), w);
        assert!(s.bytes().all(|c| c == b'0'));

        let s = f("%p", &[Arg::Ptr(0xbeef)]);
        assert_eq!(s.len(), w);
        assert!(s.ends_with("000beef"));

        let x = 5u8;
        let s = f("%p", &[(&x as *const u8).into()]);
        assert_eq!(usize::from_str_radix(&s, 16).unwrap(), &x as *const u8 as usize);
    }

    #[test]
    fn test_flags_width_precision() {
        assert_eq!(f("%5d|%-5d|%05d", &[42.into(), 42.into(), 42.into()]), "   42|42   |00042");
        assert_eq!(f("%+d|% d|%+d", &[5.into(), 5.into(), (-5).into()]), "+5| 5|-5");
        assert_eq!(f("%-+6d|", &[7.into()]), "+7    |");
        assert_eq!(f("%05d", &[(-42).into()]), "-0042");
        assert_eq!(f("%.5d|%8.3d", &[42.into(), 7.into()]), "00042|     007");
        assert_eq!(f("%08.3d", &[7.into()]), "     007");
        assert_eq!(f("[%.0d]", &[0.into()]), "[]");
        assert_eq!(f("%#x %#X %#x %#o %#o", &[255u32.into(), 255u32.into(), 0u32.into(), 8u32.into(), 0u32.into()]),
            "0xff 0XFF 0 010 0");

        assert_eq!(f("%08.3f", &[(-3.14159).into()]), "-003.142");
        assert_eq!(f("%.0f|%#.0f", &[2.5.into(), 2.5.into()]), "2|2.");
        assert_eq!(f("%.2f", &[0.125.into()]), "0.12");
        assert_eq!(f("%+.1f|% .1f", &[1.0.into(), 1.0.into()]), "+1.0| 1.0");
        assert_eq!(f("%-8.2f|", &[3.5.into()]), "3.50    |");
        assert_eq!(f("%.1f", &[(-0.0).into()]), "-0.0");
        assert_eq!(f("%.20f", &[0.1.into()]), "0.10000000000000000555");

        assert_eq!(f("%8f|%08f", &[f64::INFINITY.into(), f64::NEG_INFINITY.into()]), "     inf|    -inf");
        assert_eq!(f("%f %F", &[f64::NAN.into(), f64::NAN.into()]), "qNaN QNAN");
        assert_eq!(f("%F", &[f64::NEG_INFINITY.into()]), "-INF");

        assert_eq!(f("%.3s|%6.2s|%-4s|", &["abcdef".into(), "xyz".into(), "a".into()]), "abc|    xy|a   |");
        assert_eq!(f("%.2s", &["жx".into()]), "ж");
        assert_eq!(f("%.1s|", &["ж".into()]), "|");
        assert_eq!(f("%3c|%-3c|", &['a'.into(), 'b'.into()]), "  a|b  |");
        assert_eq!(f("%40d", &[1.into()]).len(), 40);
    }

    #[test]
    fn test_errors() {
        let mut s = String::new();
        assert_eq!(write_formatted(&mut s, "%q", &[1.into()]), Err(Error::InvalidFormatSpecifier));
        assert_eq!(write_formatted(&mut s, "abc %", &[]), Err(Error::InvalidFormatSpecifier));
        assert_eq!(write_formatted(&mut s, "%5.", &[]), Err(Error::InvalidFormatSpecifier));
        assert_eq!(
            write_formatted(&mut s, "%99999999999999999999999d", &[1.into()]),
            Err(Error::InvalidFormatSpecifier)
        );
        assert_eq!(write_formatted(&mut s, "%d", &["x".into()]), Err(Error::ArgumentMismatch));
        assert_eq!(write_formatted(&mut s, "%s", &[1.into()]), Err(Error::ArgumentMismatch));
        assert_eq!(write_formatted(&mut s, "%f", &[1.into()]), Err(Error::ArgumentMismatch));
        assert_eq!(write_formatted(&mut s, "%c", &[Arg::Ptr(1)]), Err(Error::ArgumentMismatch));
        assert_eq!(write_formatted(&mut s, "%d %d", &[1.into()]), Err(Error::MissingArgument));

        // extra arguments are ignored
        assert_eq!(write_formatted(&mut s, "x", &[1.into()]), Ok(1));
    }

    #[test]
    fn test_format_to_slice() {
        let mut buf = [0u8; 16];
        let n = format_to_slice(&mut buf, "%d-%s", &[12.into(), "ab".into()]).unwrap();
        assert_eq!(&buf[..n], b"12-ab");

        let mut buf = [0u8; 4];
        assert_eq!(format_to_slice(&mut buf, "%f", &[1.0.into()]), Err(Error::BufferInsufficient));
        // the chunks written before the failure are kept
        assert_eq!(&buf[..2], b"1.");

        let mut v = Vec::new();
        assert_eq!(write_formatted(&mut v, "%.3f", &[(-1.0005).into()]), Ok(6));
        assert_eq!(v, b"-1.000");
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_print() {
        assert_eq!(print("", &[]), Ok(0));
    }

    #[test]
    fn test_spec_parse() {
        let (spec, n) = Spec::parse(b"-+ 0#12.7lf rest").unwrap();
        assert_eq!(n, 11);
        assert!(spec.left && spec.plus && spec.space && spec.zero && spec.alt);
        assert_eq!(spec.width, 12);
        assert_eq!(spec.precision, Some(7));
        assert_eq!(spec.conv, b'f');

        let (spec, n) = Spec::parse(b".d").unwrap();
        assert_eq!(n, 2);
        assert_eq!(spec.precision, Some(0));
    }

    #[test]
    fn test_counter() {
        let mut s = String::new();
        let mut c = Counter { sink: &mut s, count: 0 };
        c.write(b"abc").unwrap();
        write_repeat(&mut c, b'x', 70).unwrap();
        assert_eq!(c.count, 73);
        assert_eq!(s.len(), 73);
    }
}
