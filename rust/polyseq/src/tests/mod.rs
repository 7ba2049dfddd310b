
use crate::Sequence;

/// A sequence of `len` random integers in `0..bound`.
fn random_ints(rng: &mut fastrand::Rng, len: usize, bound: i64) -> Sequence {
    Sequence::from_vec((0..len).map(|_| rng.i64(0..bound)).collect::<Vec<_>>())
}

fn random_words(rng: &mut fastrand::Rng, len: usize) -> Sequence {
    Sequence::from_vec(
        (0..len)
            .map(|_| {
                let word_len = rng.usize(0..6);
                (0..word_len).map(|_| rng.lowercase()).collect::<String>()
            })
            .collect::<Vec<_>>(),
    )
}
