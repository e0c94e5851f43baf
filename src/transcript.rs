//! Transcripts transform the Sigma protocols into non-interactive proofs
//! using the Merlin transcript.
//!
//! Every challenge is derived from a fresh transcript carrying the proof's
//! domain separator and the ordered items the prover committed to.
use crate::utils::{integer_to_bytes, Group};
use merlin::Transcript;
use rug::integer::Order;
use rug::ops::RemRounding;
use rug::Integer;
use std::cmp::Ordering;

const CHALLENGE_BYTES: usize = 64;

pub trait TranscriptProtocolChallenge {
    /// Reads 512 bits of challenge output and reduces them modulo `modulus`.
    fn challenge_scalar(&mut self, label: &'static [u8], modulus: &Integer) -> Integer;
}

pub trait TranscriptProtocolInteger {
    fn append_integer_scalar(&mut self, label: &'static [u8], scalar: &Integer);
}

pub trait TranscriptProtocolGroup {
    fn append_group_element<G: Group>(&mut self, label: &'static [u8], element: &G::Elem);
}

impl TranscriptProtocolChallenge for Transcript {
    fn challenge_scalar(&mut self, label: &'static [u8], modulus: &Integer) -> Integer {
        let mut buf = vec![0u8; CHALLENGE_BYTES];
        self.challenge_bytes(label, &mut buf);
        Integer::from_digits(&buf[..], Order::MsfBe).rem_euc(modulus)
    }
}

impl TranscriptProtocolInteger for Transcript {
    // one sign byte, then the big-endian magnitude
    fn append_integer_scalar(&mut self, label: &'static [u8], scalar: &Integer) {
        let sign = if scalar.cmp0() == Ordering::Less { 1u8 } else { 0u8 };
        let mut bytes = vec![sign];
        bytes.extend(integer_to_bytes(&Integer::from(scalar.abs_ref())));
        self.append_message(label, &bytes);
    }
}

impl TranscriptProtocolGroup for Transcript {
    fn append_group_element<G: Group>(&mut self, label: &'static [u8], element: &G::Elem) {
        self.append_message(label, &G::elem_to_bytes(element));
    }
}

/// A value absorbed into a challenge. Sequences are flattened depth-first.
pub enum TranscriptItem<'a, G: Group> {
    Element(&'a G::Elem),
    Integer(&'a Integer),
    Bytes(&'a [u8]),
    Sequence(Vec<TranscriptItem<'a, G>>),
}

impl<'a, G: Group> TranscriptItem<'a, G> {
    pub fn elements<I: IntoIterator<Item = &'a G::Elem>>(elements: I) -> TranscriptItem<'a, G> {
        TranscriptItem::Sequence(elements.into_iter().map(TranscriptItem::Element).collect())
    }
}

fn append_items<G: Group>(transcript: &mut Transcript, items: &[TranscriptItem<G>]) {
    for item in items {
        match item {
            TranscriptItem::Element(element) => {
                transcript.append_group_element::<G>(b"element", element)
            }
            TranscriptItem::Integer(scalar) => transcript.append_integer_scalar(b"integer", scalar),
            TranscriptItem::Bytes(bytes) => transcript.append_message(b"bytes", bytes),
            TranscriptItem::Sequence(inner) => append_items(transcript, inner),
        }
    }
}

/// Derives a challenge in `[0, modulus)` from a domain separator and an
/// ordered list of items. Identical inputs always give the identical
/// challenge.
pub fn derive_challenge<G: Group>(
    domain: &'static [u8],
    items: &[TranscriptItem<G>],
    modulus: &Integer,
) -> Integer {
    let mut transcript = Transcript::new(b"committed-integer-proofs");
    transcript.append_message(b"dom-sep", domain);
    append_items(&mut transcript, items);
    transcript.challenge_scalar(b"c", modulus)
}

#[cfg(test)]
mod test {
    use super::{
        derive_challenge, TranscriptItem, TranscriptProtocolGroup, TranscriptProtocolInteger,
    };
    use crate::utils::{Group, Modp2048};
    use merlin::Transcript;
    use rug::Integer;

    #[test]
    fn test_determinism() {
        let a = Modp2048::hash_to_elem(b"a");
        let b = Modp2048::hash_to_elem(b"b");
        let modulus = Integer::from(Integer::u_pow_u(2, 120));
        let first = derive_challenge::<Modp2048>(
            b"test",
            &[TranscriptItem::Element(&a), TranscriptItem::Element(&b)],
            &modulus,
        );
        let again = derive_challenge::<Modp2048>(
            b"test",
            &[TranscriptItem::Element(&a), TranscriptItem::Element(&b)],
            &modulus,
        );
        let swapped = derive_challenge::<Modp2048>(
            b"test",
            &[TranscriptItem::Element(&b), TranscriptItem::Element(&a)],
            &modulus,
        );
        let other_domain = derive_challenge::<Modp2048>(
            b"other",
            &[TranscriptItem::Element(&a), TranscriptItem::Element(&b)],
            &modulus,
        );
        assert_eq!(first, again);
        assert_ne!(first, swapped);
        assert_ne!(first, other_domain);
        assert!(first < modulus);
    }

    #[test]
    fn test_sequences_flatten() {
        let a = Modp2048::hash_to_elem(b"a");
        let b = Modp2048::hash_to_elem(b"b");
        let modulus = Modp2048::order();
        let flat = derive_challenge::<Modp2048>(
            b"test",
            &[TranscriptItem::Element(&a), TranscriptItem::Element(&b)],
            &modulus,
        );
        let nested = derive_challenge::<Modp2048>(
            b"test",
            &[TranscriptItem::elements(vec![&a, &b])],
            &modulus,
        );
        assert_eq!(flat, nested);
    }

    #[test]
    fn test_integer_sign() {
        let modulus = Integer::from(Integer::u_pow_u(2, 120));
        let positive = Integer::from(5);
        let negative = Integer::from(-5);
        assert_ne!(
            derive_challenge::<Modp2048>(b"test", &[TranscriptItem::Integer(&positive)], &modulus),
            derive_challenge::<Modp2048>(b"test", &[TranscriptItem::Integer(&negative)], &modulus),
        );
    }

    #[test]
    fn test_known_answer() {
        let g = Modp2048::generator();
        let negative = Integer::from(-5);
        let positive = Integer::from(2493823);

        let mut transcript = Transcript::new(b"committed-integer-proofs");
        transcript.append_message(b"dom-sep", b"test");
        transcript.append_group_element::<Modp2048>(b"element", &g);
        transcript.append_integer_scalar(b"integer", &negative);
        transcript.append_integer_scalar(b"integer", &positive);
        transcript.append_message(b"bytes", b"abc");
        let mut buf = [0u8; 64];
        transcript.challenge_bytes(b"c", &mut buf);
        let hex: String = buf.iter().map(|b| format!("{:02x}", b)).collect();
        assert_eq!(
            hex,
            "5bb7a0b498816fd6dc1e458a351dd0d7e2b37d70400dfb568a55e8a851cbc573\
             e2b5d8caf8ff2dc7112c69bca581707af2d076c0fdc54b24f0520f12d0f8500a"
        );

        let items = [
            TranscriptItem::Element(&g),
            TranscriptItem::Integer(&negative),
            TranscriptItem::Integer(&positive),
            TranscriptItem::Bytes(b"abc"),
        ];
        let modulus = Integer::from(Integer::u_pow_u(2, 120));
        assert_eq!(
            derive_challenge::<Modp2048>(b"test", &items, &modulus),
            "1082406361253898512747493274972344330".parse::<Integer>().unwrap()
        );
        assert_eq!(
            derive_challenge::<Modp2048>(b"test", &items, &Modp2048::order()),
            "4803624560769658496305610186204923593648648029178710665981650760707533366426990119805094535202518088083549983374798647161506560027494090116177758934028298"
                .parse::<Integer>()
                .unwrap()
        );
    }
}
