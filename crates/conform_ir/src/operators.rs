//! Operator vocabulary for contract members.
//!
//! Binary operators, the side a receiver occupies in one, and the two
//! conversion flavours a contract can ask for.

/// Binary operators a contract may require.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
}

impl BinaryOp {
    /// Every operator, in fallback-table group order.
    pub const ALL: [BinaryOp; 14] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Eq,
        Self::NotEq,
        Self::Lt,
        Self::Gt,
        Self::LtEq,
        Self::GtEq,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
    ];

    /// Returns the source-level symbol for this operator.
    ///
    /// Used in issue messages to show the exact operator that was missing.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
        }
    }

    /// Parse an operator symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_symbol() == symbol)
    }

    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::Gt | Self::LtEq | Self::GtEq
        )
    }

    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Eq | Self::NotEq)
    }

    pub const fn is_bitwise(self) -> bool {
        matches!(self, Self::BitAnd | Self::BitOr | Self::BitXor)
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Which operand position the adapted instance occupies.
///
/// A contract operator always takes the other operand as its single
/// parameter; the side says whether the receiver sits left or right of it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpSide {
    /// `receiver op other`
    #[default]
    ReceiverLeft,
    /// `other op receiver`
    ReceiverRight,
}

impl OpSide {
    /// Order `(receiver, other)` into `(left, right)`.
    #[inline]
    pub fn arrange<T>(self, receiver: T, other: T) -> (T, T) {
        match self {
            Self::ReceiverLeft => (receiver, other),
            Self::ReceiverRight => (other, receiver),
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            Self::ReceiverLeft => "receiver on the left",
            Self::ReceiverRight => "receiver on the right",
        }
    }
}

/// Conversion flavour.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConversionKind {
    Explicit,
    Implicit,
}

impl ConversionKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Implicit => "implicit",
        }
    }
}
