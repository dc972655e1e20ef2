//! Bytecode fingerprinting
//!
//! solc appends a CBOR metadata blob to deployed bytecode. The blob hashes the
//! build inputs, so two deployments of the same proxy source can differ only
//! there. The last two bytes give the blob length, which identifies the
//! encoding: <https://docs.soliditylang.org/en/develop/metadata.html#encoding-of-the-metadata-hash-in-the-bytecode>

/// `0xa1 0x65 'b' 'z' 'z' 'r' '0' 0x58 0x20 <32 bytes swarm hash> 0x00 0x29`
const BZZR0_MARKER: &str = "0029";
const BZZR0_LEN: usize = 43;

/// `0xa2 0x65 'b' 'z' 'z' 'r' '0' 0x58 0x20 <32 bytes swarm hash>
///  0x64 's' 'o' 'l' 'c' 0x43 <3 byte version> 0x00 0x32`
const BZZR0_SOLC_MARKER: &str = "0032";
const BZZR0_SOLC_LEN: usize = 52;

/// Strip the compiler metadata suffix so bytecode compares by logic only.
///
/// Bytecode ending in neither known marker, or too short to hold the blob it
/// advertises, is returned unchanged.
///
/// Only the final marker is inspected, so a second call trims again when the
/// remaining prefix itself ends in `0029` or `0032`. Real deployed bytecode
/// never does, but the function is not idempotent for arbitrary hex.
pub fn fingerprint(bytecode: &str) -> &str {
    let blob_len = if bytecode.ends_with(BZZR0_MARKER) {
        BZZR0_LEN
    } else if bytecode.ends_with(BZZR0_SOLC_MARKER) {
        BZZR0_SOLC_LEN
    } else {
        return bytecode;
    };

    let hex_len = blob_len * 2;
    match bytecode.len().checked_sub(hex_len) {
        Some(end) if bytecode.is_char_boundary(end) => &bytecode[..end],
        _ => bytecode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "0x608060405260043610603f57600035";

    fn with_bzzr0(code: &str) -> String {
        format!("{code}a165627a7a72305820{}0029", "11".repeat(32))
    }

    fn with_bzzr0_solc(code: &str) -> String {
        format!(
            "{code}a265627a7a72305820{}64736f6c634300050d0032",
            "22".repeat(32)
        )
    }

    #[test]
    fn strips_bzzr0_blob() {
        let bytecode = with_bzzr0(CODE);
        assert_eq!(bytecode.len() - CODE.len(), 86);
        assert_eq!(fingerprint(&bytecode), CODE);
    }

    #[test]
    fn strips_bzzr0_blob_with_compiler_version() {
        let bytecode = with_bzzr0_solc(CODE);
        assert_eq!(bytecode.len() - CODE.len(), 104);
        assert_eq!(fingerprint(&bytecode), CODE);
    }

    #[test]
    fn deployments_differing_only_in_metadata_match() {
        let a = with_bzzr0(CODE);
        let b = format!("{CODE}a165627a7a72305820{}0029", "ee".repeat(32));
        assert_ne!(a, b);
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn other_suffixes_are_untouched() {
        // ipfs + solc 0.8 metadata ends in 0x0033
        let bytecode = format!("{CODE}a264697066735822{}64736f6c63430008110033", "33".repeat(34));
        assert_eq!(fingerprint(&bytecode), bytecode);
        assert_eq!(fingerprint(CODE), CODE);
        assert_eq!(fingerprint("0x"), "0x");
        assert_eq!(fingerprint(""), "");
    }

    #[test]
    fn too_short_input_is_untouched() {
        assert_eq!(fingerprint("0x0029"), "0x0029");
        assert_eq!(fingerprint("0032"), "0032");
    }

    #[test]
    fn idempotent() {
        for bytecode in [
            with_bzzr0(CODE),
            with_bzzr0_solc(CODE),
            CODE.to_string(),
            "0x".to_string(),
            "0x0029".to_string(),
        ] {
            let once = fingerprint(&bytecode);
            assert_eq!(fingerprint(once), once, "not idempotent for {bytecode}");
        }
    }

    #[test]
    fn trims_again_when_prefix_ends_in_marker() {
        let inner = format!("0x6080{}", "00".repeat(41) + "0029");
        let bytecode = format!("{inner}{}", "11".repeat(41) + "0029");
        let once = fingerprint(&bytecode);
        assert_eq!(once, inner);
        assert_eq!(fingerprint(once), "0x6080");
    }
}
