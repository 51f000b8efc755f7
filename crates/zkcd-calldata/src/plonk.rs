//! # PLONK Calldata Assembly
//!
//! The proving library exports PLONK calldata as two comma-joined fields:
//!
//! ```text
//! 0x<proof bytes as hex>,["0x..","0x..",...]
//! ```
//!
//! The first field is handed to the verifier verbatim. The second is a JSON
//! array literal of public inputs. Commas inside the array (or inside quoted
//! strings) do not separate fields, so circuits with several public signals
//! split the same way as circuits with one.

use serde_json::Value;
use zkcd_core::ProofTree;

use crate::args::{canonical_uints, PlonkArgs};
use crate::error::CalldataError;

/// Split `raw` on commas that sit outside brackets, braces and quotes.
pub fn split_top_level(raw: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, ch) in raw.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                fields.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&raw[start..]);
    fields
}

/// Assemble PLONK verifier arguments from exported calldata text.
pub fn assemble_plonk(raw: &str) -> Result<PlonkArgs, CalldataError> {
    let fields = split_top_level(raw);
    let [blob, inputs] = fields.as_slice() else {
        return Err(CalldataError::MalformedCalldataShape {
            fields: fields.len(),
        });
    };

    let parsed: Value = serde_json::from_str(inputs.trim())?;
    let Value::Array(items) = parsed else {
        return Err(CalldataError::PublicInputsNotArray(parsed.to_string()));
    };
    let public_inputs = canonical_uints(items.into_iter().map(ProofTree::from_json).collect())?;

    let args = PlonkArgs {
        proof_blob: blob.trim().to_string(),
        public_inputs,
    };
    tracing::debug!(
        blob_len = args.proof_blob.len(),
        public_inputs = args.public_inputs.len(),
        "assembled plonk calldata"
    );
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn single_public_input() {
        let raw = r#"0xdeadbeef,["0x0000000000000000000000000000000000000000000000000000000000000006"]"#;
        let args = assemble_plonk(raw).unwrap();
        assert_eq!(args.proof_blob, "0xdeadbeef");
        assert_eq!(args.public_inputs, vec![BigUint::from(6u32)]);
    }

    #[test]
    fn several_public_inputs_stay_in_one_field() {
        let raw = r#"0xab,["0x01","2", "0x03"]"#;
        assert_eq!(split_top_level(raw).len(), 2);
        let args = assemble_plonk(raw).unwrap();
        assert_eq!(
            args.public_inputs,
            vec![BigUint::from(1u32), BigUint::from(2u32), BigUint::from(3u32)]
        );
    }

    #[test]
    fn empty_public_inputs() {
        let args = assemble_plonk("0xab,[]").unwrap();
        assert!(args.public_inputs.is_empty());
    }

    #[test]
    fn more_than_two_fields_rejected() {
        let err = assemble_plonk(r#"0xab,["1"],0xcd"#).unwrap_err();
        assert!(matches!(
            err,
            CalldataError::MalformedCalldataShape { fields: 3 }
        ));
    }

    #[test]
    fn single_field_rejected() {
        let err = assemble_plonk("0xab").unwrap_err();
        assert!(matches!(
            err,
            CalldataError::MalformedCalldataShape { fields: 1 }
        ));
        let err = assemble_plonk("").unwrap_err();
        assert!(matches!(
            err,
            CalldataError::MalformedCalldataShape { fields: 1 }
        ));
    }

    #[test]
    fn quoted_commas_do_not_split() {
        assert_eq!(split_top_level(r#"a,"b,c",[d,e]"#), vec!["a", r#""b,c""#, "[d,e]"]);
        assert_eq!(split_top_level(r#""x\",y",z"#), vec![r#""x\",y""#, "z"]);
    }

    #[test]
    fn invalid_json_inputs() {
        let err = assemble_plonk("0xab,[0x01]").unwrap_err();
        assert!(matches!(err, CalldataError::InvalidPublicInputs(_)));
    }

    #[test]
    fn non_array_inputs() {
        let err = assemble_plonk(r#"0xab,{"a":1}"#).unwrap_err();
        assert!(matches!(err, CalldataError::PublicInputsNotArray(_)));
    }

    #[test]
    fn non_numeric_input() {
        let err = assemble_plonk(r#"0xab,["1","two"]"#).unwrap_err();
        assert!(matches!(
            err,
            CalldataError::NonNumericElement { index: 1, .. }
        ));
    }

    #[test]
    fn unquoted_wide_input() {
        let r_minus_one =
            "21888242871839275222246405745257275088548364400416034343698204186575808495616";
        let args = assemble_plonk(&format!("0xab,[{r_minus_one}, 7]")).unwrap();
        assert_eq!(
            args.public_inputs,
            vec![r_minus_one.parse::<BigUint>().unwrap(), BigUint::from(7u32)]
        );
    }

    #[test]
    fn blob_is_verbatim() {
        let args = assemble_plonk(r#" 0xABcd ,["1"]"#).unwrap();
        assert_eq!(args.proof_blob, "0xABcd");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any number of public inputs keeps the calldata at two fields.
        #[test]
        fn two_fields_for_any_input_count(inputs in prop::collection::vec(any::<u64>(), 0..16)) {
            let list: Vec<String> = inputs.iter().map(|n| format!("\"0x{n:x}\"")).collect();
            let raw = format!("0x00,[{}]", list.join(","));
            let args = assemble_plonk(&raw).unwrap();
            prop_assert_eq!(args.public_inputs.len(), inputs.len());
        }

        /// Extra top-level fields are always reported, never truncated.
        #[test]
        fn extra_fields_rejected(extra in 1usize..5) {
            let raw = format!("0x00,[\"1\"]{}", ",0x00".repeat(extra));
            let result = assemble_plonk(&raw);
            let is_expected_err = matches!(
                result,
                Err(CalldataError::MalformedCalldataShape { fields }) if fields == 2 + extra
            );
            prop_assert!(is_expected_err);
        }
    }
}
