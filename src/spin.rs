/// Two-valued spin state of a lattice site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Spin {
    Up = 1,
    Down = -1,
}

impl Spin {
    /// Raw cell value (+1 or -1).
    #[inline(always)]
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Interpret a raw cell value. Zero (unfilled storage) has no spin.
    #[inline]
    pub fn from_value(v: i8) -> Option<Self> {
        match v {
            1 => Some(Spin::Up),
            -1 => Some(Spin::Down),
            _ => None,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Spin::Up => Spin::Down,
            Spin::Down => Spin::Up,
        }
    }

    /// Text symbol used by the renderer.
    pub fn symbol(self) -> char {
        match self {
            Spin::Up => '+',
            Spin::Down => '-',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Spin::Up),
            '-' => Some(Spin::Down),
            _ => None,
        }
    }
}

impl std::str::FromStr for Spin {
    type Err = String;

    /// Accepts `up`/`down` (any case) or the `+`/`-` symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "+" | "+1" | "1" => Ok(Spin::Up),
            "down" | "-" | "-1" => Ok(Spin::Down),
            other => Err(format!("unknown spin `{other}`, expected `up` or `down`")),
        }
    }
}
