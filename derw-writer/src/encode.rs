//! Two-phase orchestration
//!
//! Backward construction needs the total size before it can start writing at
//! the tail of a destination. The protocol is:
//! 1. Run the encoder against a sizing [`DerSink`] to learn the total length
//! 2. Provide a destination of that length
//! 3. Run the same encoder again against a writing sink over it
//!
//! [`Encode`] is the seam both passes share, and [`Element`] is an explicit
//! tree that implements it. [`Element::write_forward`] replays the same tree
//! through the [`RegionBuilder`] convention.
//!
//! # Usage Example
//!
//! ```rust
//! use derw_writer::{Element, measure, to_vec};
//!
//! let tree = Element::Sequence(vec![Element::Boolean(true)]);
//! assert_eq!(measure(&tree)?, 5);
//! assert_eq!(to_vec(&tree)?, [0x30, 0x03, 0x01, 0x01, 0xFF]);
//! # Ok::<(), derw_writer::DerError>(())
//! ```

use crate::bignum::BigNumber;
use crate::constructed::{nest_context, nest_sequence};
use crate::primitive::{write_boolean, write_integer, write_null, write_precompiled, write_unsigned};
use crate::region::RegionBuilder;
use crate::sink::DerSink;
use derw_core::{DerError, DerResult};
use std::fmt;

/// A value that can be written with the counter + backward-cursor convention
pub trait Encode {
    /// Write `self` in front of the sink cursor, adding to `cnt`
    ///
    /// Returns the updated running count. Sizing and writing sinks must see
    /// exactly the same sequence of writes.
    fn encode(&self, sink: &mut DerSink<'_>, cnt: &mut usize) -> DerResult<usize>;
}

/// Siblings, written last to first so they read first to last
impl<T: Encode> Encode for [T] {
    fn encode(&self, sink: &mut DerSink<'_>, cnt: &mut usize) -> DerResult<usize> {
        for item in self.iter().rev() {
            item.encode(sink, cnt)?;
        }
        Ok(*cnt)
    }
}

/// Adapter turning a closure over the raw counter convention into [`Encode`]
pub struct EncodeFn<F>(pub F);

impl<F> Encode for EncodeFn<F>
where
    F: Fn(&mut DerSink<'_>, &mut usize) -> DerResult<usize>,
{
    fn encode(&self, sink: &mut DerSink<'_>, cnt: &mut usize) -> DerResult<usize> {
        (self.0)(sink, cnt)
    }
}

/// Total encoded size of `value`
pub fn measure<E: Encode + ?Sized>(value: &E) -> DerResult<usize> {
    let mut cnt = 0;
    value.encode(&mut DerSink::sizing(), &mut cnt)?;
    Ok(cnt)
}

/// Write `value` at the tail of `dest`
///
/// # Arguments
/// * `value` - Encoder to run in writing mode
/// * `dest` - Destination window, usually sized by [`measure`]
///
/// # Returns
/// The number of bytes written `n`; the output is `dest[dest.len() - n..]`.
/// On error the contents of `dest` are unspecified.
///
/// # Why This Design?
/// Writing runs from the end of the window, so a window larger than needed
/// still works and leaves the unused prefix untouched.
pub fn write<E: Encode + ?Sized>(value: &E, dest: &mut [u8]) -> DerResult<usize> {
    let mut cnt = 0;
    value.encode(&mut DerSink::writing(dest), &mut cnt)?;
    Ok(cnt)
}

/// Measure, allocate and write `value` into a new vector
///
/// # Errors
/// - `DerError::AllocationFailure` if the output cannot be allocated
/// - `DerError::InternalInvariantViolation` if the two passes disagree
/// - any error raised by the encoder itself
pub fn to_vec<E: Encode + ?Sized>(value: &E) -> DerResult<Vec<u8>> {
    let len = measure(value)?;
    log::trace!("Measured {} DER bytes", len);

    let mut out = Vec::new();
    out.try_reserve_exact(len)?;
    out.resize(len, 0);

    let written = write(value, &mut out)?;
    if written != len {
        log::error!("DER sizing pass measured {} bytes, writing pass wrote {}", len, written);
        return Err(DerError::InternalInvariantViolation {
            expected: len,
            found: written,
        });
    }
    Ok(out)
}

/// Run a closure through both passes and return the finished encoding
pub fn two_pass<F>(f: F) -> DerResult<Vec<u8>>
where
    F: Fn(&mut DerSink<'_>, &mut usize) -> DerResult<usize>,
{
    to_vec(&EncodeFn(f))
}

/// Explicit DER element tree
///
/// Children are listed in reading order.
pub enum Element<'a> {
    /// BOOLEAN
    Boolean(bool),
    /// Non-negative INTEGER from a native value
    Unsigned(u64),
    /// Non-negative INTEGER from an arbitrary-precision value
    Integer(&'a dyn BigNumber),
    /// NULL
    Null,
    /// Already DER-encoded bytes copied verbatim
    Precompiled(&'a [u8]),
    /// SEQUENCE of child elements
    Sequence(Vec<Element<'a>>),
    /// Explicit context tag `[n]` wrapping child elements
    Context(u32, Vec<Element<'a>>),
}

impl Element<'_> {
    /// Append this element through the forward region convention
    pub fn write_forward(&self, builder: &mut RegionBuilder) -> DerResult<()> {
        match self {
            Element::Boolean(value) => builder.boolean(*value),
            Element::Unsigned(value) => builder.unsigned(*value),
            Element::Integer(value) => builder.integer(*value),
            Element::Null => builder.null(),
            Element::Precompiled(der) => builder.precompiled(der),
            Element::Sequence(children) => {
                builder.start_sequence()?;
                for child in children {
                    child.write_forward(builder)?;
                }
                builder.end_sequence()
            }
            Element::Context(num, children) => {
                builder.start_context(*num)?;
                for child in children {
                    child.write_forward(builder)?;
                }
                builder.end_context()
            }
        }
    }
}

impl Encode for Element<'_> {
    fn encode(&self, sink: &mut DerSink<'_>, cnt: &mut usize) -> DerResult<usize> {
        match self {
            Element::Boolean(value) => write_boolean(sink, cnt, *value),
            Element::Unsigned(value) => write_unsigned(sink, cnt, *value),
            Element::Integer(value) => write_integer(sink, cnt, *value),
            Element::Null => write_null(sink, cnt),
            Element::Precompiled(der) => write_precompiled(sink, cnt, der),
            Element::Sequence(children) => {
                nest_sequence(sink, cnt, |sink, level| children.as_slice().encode(sink, level))
            }
            Element::Context(num, children) => nest_context(sink, cnt, *num, |sink, level| {
                children.as_slice().encode(sink, level)
            }),
        }
    }
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Boolean(value) => f.debug_tuple("Boolean").field(value).finish(),
            Element::Unsigned(value) => f.debug_tuple("Unsigned").field(value).finish(),
            Element::Integer(value) => write!(f, "Integer({} bytes)", value.num_bytes()),
            Element::Null => write!(f, "Null"),
            Element::Precompiled(der) => f.debug_tuple("Precompiled").field(der).finish(),
            Element::Sequence(children) => f.debug_tuple("Sequence").field(children).finish(),
            Element::Context(num, children) => {
                f.debug_tuple("Context").field(num).field(children).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bignum::LimbInteger;
    use crate::constructed::write_sequence;
    use proptest::collection::vec;
    use proptest::prelude::*;

    /// Owned mirror of [`Element`] for generated inputs
    #[derive(Debug, Clone)]
    enum Node {
        Boolean(bool),
        Unsigned(u64),
        Integer(LimbInteger),
        Null,
        Precompiled(Vec<u8>),
        Sequence(Vec<Node>),
        Context(u32, Vec<Node>),
    }

    impl Node {
        fn element(&self) -> Element<'_> {
            match self {
                Node::Boolean(v) => Element::Boolean(*v),
                Node::Unsigned(v) => Element::Unsigned(*v),
                Node::Integer(v) => Element::Integer(v),
                Node::Null => Element::Null,
                Node::Precompiled(der) => Element::Precompiled(der),
                Node::Sequence(children) => {
                    Element::Sequence(children.iter().map(Node::element).collect())
                }
                Node::Context(num, children) => {
                    Element::Context(*num, children.iter().map(Node::element).collect())
                }
            }
        }
    }

    fn node_strategy() -> impl Strategy<Value = Node> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(Node::Boolean),
            any::<u64>().prop_map(Node::Unsigned),
            vec(any::<u8>(), 0..40).prop_map(|b| Node::Integer(LimbInteger::from_be_bytes(&b))),
            Just(Node::Null),
            vec(any::<u8>(), 0..20).prop_map(Node::Precompiled),
        ];
        leaf.prop_recursive(4, 64, 6, |inner| {
            prop_oneof![
                vec(inner.clone(), 0..6).prop_map(Node::Sequence),
                (0u32..30, vec(inner, 0..6)).prop_map(|(num, c)| Node::Context(num, c)),
            ]
        })
    }

    fn forward(element: &Element<'_>) -> Vec<u8> {
        let mut builder = RegionBuilder::new();
        element.write_forward(&mut builder).unwrap();
        builder.finish().unwrap().to_vec()
    }

    #[test]
    fn test_sequence_of_boolean() {
        let tree = Element::Sequence(vec![Element::Boolean(true)]);
        assert_eq!(to_vec(&tree).unwrap(), [0x30, 0x03, 0x01, 0x01, 0xFF]);
        assert_eq!(forward(&tree), [0x30, 0x03, 0x01, 0x01, 0xFF]);
    }

    #[test]
    fn test_context_of_unsigned() {
        let tree = Element::Context(2, vec![Element::Unsigned(20)]);
        assert_eq!(to_vec(&tree).unwrap(), [0xA2, 0x03, 0x02, 0x01, 0x14]);
    }

    #[test]
    fn test_siblings_keep_reading_order() {
        let siblings = [Element::Null, Element::Boolean(false), Element::Unsigned(1)];
        assert_eq!(
            to_vec(&siblings[..]).unwrap(),
            [0x05, 0x00, 0x01, 0x00, 0x02, 0x01, 0x01]
        );
    }

    #[test]
    fn test_write_into_larger_buffer_uses_tail() {
        let tree = Element::Sequence(vec![Element::Null]);
        let mut buf = [0xEEu8; 8];
        let n = write(&tree, &mut buf).unwrap();
        assert_eq!(n, 4);
        assert_eq!(buf, [0xEE, 0xEE, 0xEE, 0xEE, 0x30, 0x02, 0x05, 0x00]);
    }

    #[test]
    fn test_write_into_short_buffer_fails() {
        let tree = Element::Sequence(vec![Element::Null]);
        let mut buf = [0u8; 3];
        assert!(matches!(
            write(&tree, &mut buf),
            Err(DerError::BufferUnderflow { .. })
        ));
    }

    #[test]
    fn test_context_out_of_range_aborts_tree() {
        let tree = Element::Sequence(vec![
            Element::Boolean(true),
            Element::Context(30, vec![Element::Null]),
        ]);
        assert_eq!(measure(&tree), Err(DerError::TagOutOfRange(30)));
        assert_eq!(to_vec(&tree), Err(DerError::TagOutOfRange(30)));
    }

    #[test]
    fn test_negative_integer_aborts_tree() {
        let negative = LimbInteger::from(-42i64);
        let tree = Element::Sequence(vec![Element::Integer(&negative)]);
        assert_eq!(to_vec(&tree), Err(DerError::NegativeValueUnsupported));
    }

    #[test]
    fn test_two_pass_closure() {
        let der = two_pass(|sink, cnt| {
            write_boolean(sink, cnt, true)?;
            write_sequence(sink, cnt)
        })
        .unwrap();
        assert_eq!(der, [0x30, 0x03, 0x01, 0x01, 0xFF]);
    }

    #[test]
    fn test_two_pass_detects_inconsistent_encoder() {
        let outcome = two_pass(|sink, cnt| {
            let value = if sink.is_sizing() { 0x7F } else { 0x80 };
            write_unsigned(sink, cnt, value)
        });
        assert!(matches!(outcome, Err(DerError::BufferUnderflow { .. })));

        let outcome = two_pass(|sink, cnt| {
            let value = if sink.is_sizing() { 0x80 } else { 0x7F };
            write_unsigned(sink, cnt, value)
        });
        assert_eq!(
            outcome,
            Err(DerError::InternalInvariantViolation {
                expected: 4,
                found: 3
            })
        );
    }

    proptest! {
        /// Sizing and writing passes agree for any tree
        #[test]
        fn prop_measure_matches_write(node in node_strategy()) {
            let element = node.element();
            if let Ok(len) = measure(&element) {
                let mut buf = vec![0u8; len];
                prop_assert_eq!(write(&element, &mut buf), Ok(len));
            }
        }

        /// Both calling conventions produce identical bytes
        #[test]
        fn prop_conventions_agree(node in node_strategy()) {
            let element = node.element();
            let backward = to_vec(&element);
            let mut builder = RegionBuilder::new();
            let forward = element
                .write_forward(&mut builder)
                .and_then(|()| builder.finish())
                .map(|bytes| bytes.to_vec());
            prop_assert_eq!(backward, forward);
        }

        /// One byte short always underflows
        #[test]
        fn prop_short_window_underflows(node in node_strategy()) {
            let element = node.element();
            if let Ok(len) = measure(&element) {
                prop_assume!(len > 0);
                let mut buf = vec![0u8; len - 1];
                let underflowed = matches!(write(&element, &mut buf), Err(DerError::BufferUnderflow { .. }));
                prop_assert!(underflowed);
            }
        }
    }
}
