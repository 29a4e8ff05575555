//! The narrow boundary to the external inference engine.
//!
//! Generation, model loading, and sampling all live on the far side of
//! [`Tokenizer`]; this crate only needs to turn prompt text into token
//! ids, so that is the whole surface.

/// Token id in the engine's vocabulary. The engine ABI uses 32-bit ids.
pub type Token = i32;

/// Tokenization surface of the external engine.
pub trait Tokenizer {
    /// Write token ids for `text` into `tokens`, optionally preceded by
    /// a beginning-of-sequence marker, and return how many were written.
    ///
    /// A negative return signals an engine-internal failure. That is a
    /// programming error on this side of the boundary, never a
    /// consequence of user input.
    fn tokenize_into(&self, text: &str, tokens: &mut [Token], add_bos: bool) -> i32;
}

/// Tokenize `text`, sizing the scratch buffer up front.
///
/// The engine never produces more tokens than input bytes, so a buffer
/// of `text.len()` ids, plus one for the optional beginning-of-sequence
/// marker, always suffices.
///
/// # Panics
///
/// Panics if the engine reports a negative token count.
pub fn tokenize<T: Tokenizer + ?Sized>(tokenizer: &T, text: &str, add_bos: bool) -> Vec<Token> {
    let mut tokens: Vec<Token> = vec![0; text.len() + usize::from(add_bos)];
    let produced = tokenizer.tokenize_into(text, &mut tokens, add_bos);
    assert!(
        produced >= 0,
        "engine reported a negative token count: {produced}"
    );
    tokens.truncate(produced as usize);
    tokens
}
