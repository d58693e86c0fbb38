use crate::ecdsa::{
    EcdsaSigner, RecoverableSignature, Secp256k1Signer, MESSAGE_HASH_LEN, PUBLIC_KEY_LEN,
};
use crate::error::{Result, TronError};
use crate::transaction::{ERROR_FIELD, RAW_DATA_FIELD, SIGNATURE_FIELD, TX_ID_FIELD};
use crate::utils::{hex_decode, hex_encode};
use crate::wallet::PrivateKey;
use serde_json::{Map, Value};

/// A payload as received from the node, nothing checked yet.
#[derive(Debug, Clone)]
pub struct UnsignedTransaction {
    payload: Value,
}

/// A payload whose shape has been checked and whose transaction id is decoded.
#[derive(Debug, Clone)]
pub struct ValidatedTransaction {
    payload: Map<String, Value>,
    tx_id: [u8; MESSAGE_HASH_LEN],
}

/// A payload carrying its signature.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    payload: Map<String, Value>,
    tx_id: [u8; MESSAGE_HASH_LEN],
    signature: RecoverableSignature,
}

impl UnsignedTransaction {
    pub fn from_value(payload: Value) -> UnsignedTransaction {
        UnsignedTransaction { payload }
    }

    pub fn from_json(json: &str) -> Result<UnsignedTransaction> {
        Ok(Self::from_value(serde_json::from_str(json)?))
    }

    /// Check the payload is signable. The upstream error marker wins over every
    /// other check, then an existing signature, then missing fields.
    pub fn validate(self) -> Result<ValidatedTransaction> {
        let payload = match self.payload {
            Value::Object(map) => map,
            other => {
                return Err(TronError::Runtime(format!(
                    "Transaction payload must be a JSON object, got {other}"
                )))
            }
        };

        if let Some(error) = payload.get(ERROR_FIELD) {
            let message = match error {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            return Err(TronError::Runtime(message));
        }

        if payload.contains_key(SIGNATURE_FIELD) {
            return Err(TronError::AlreadySigned);
        }

        let tx_id = match payload.get(TX_ID_FIELD) {
            Some(Value::String(tx_id)) if !tx_id.is_empty() => tx_id,
            _ => {
                return Err(TronError::Runtime(format!(
                    "Transaction is missing {TX_ID_FIELD}"
                )))
            }
        };

        match payload.get(RAW_DATA_FIELD) {
            None | Some(Value::Null) => {
                return Err(TronError::Runtime(format!(
                    "Transaction is missing {RAW_DATA_FIELD}"
                )))
            }
            Some(_) => {}
        }

        let decoded = hex_decode(tx_id)
            .map_err(|e| TronError::Runtime(format!("Invalid {TX_ID_FIELD}: {e}")))?;
        let tx_id: [u8; MESSAGE_HASH_LEN] = decoded.as_slice().try_into().map_err(|_| {
            TronError::Runtime(format!(
                "{TX_ID_FIELD} must be {MESSAGE_HASH_LEN} bytes, got {}",
                decoded.len()
            ))
        })?;

        Ok(ValidatedTransaction { payload, tx_id })
    }
}

impl ValidatedTransaction {
    pub fn tx_id(&self) -> &[u8; MESSAGE_HASH_LEN] {
        &self.tx_id
    }

    /// Sign the transaction id as a prehashed message.
    pub fn sign<S: EcdsaSigner>(
        self,
        signer: &S,
        private_key: &PrivateKey,
    ) -> Result<SignedTransaction> {
        let signature = signer.sign_prehash(&self.tx_id, private_key.as_bytes())?;
        Ok(SignedTransaction {
            payload: self.payload,
            tx_id: self.tx_id,
            signature,
        })
    }
}

impl SignedTransaction {
    pub fn tx_id(&self) -> &[u8; MESSAGE_HASH_LEN] {
        &self.tx_id
    }

    pub fn signature(&self) -> &RecoverableSignature {
        &self.signature
    }

    /// The original payload with `signature: [hex(r || s || v)]` attached.
    pub fn into_value(self) -> Value {
        let mut payload = self.payload;
        payload.insert(
            SIGNATURE_FIELD.to_string(),
            Value::Array(vec![Value::String(self.signature.to_hex())]),
        );
        Value::Object(payload)
    }
}

/// Sign a node-built transaction with a hex private key.
pub fn sign_transaction(payload: Value, private_key: &str) -> Result<Value> {
    sign_transaction_with(&Secp256k1Signer, payload, private_key)
}

pub fn sign_transaction_with<S: EcdsaSigner>(
    signer: &S,
    payload: Value,
    private_key: &str,
) -> Result<Value> {
    if private_key.trim().is_empty() {
        log::warn!("Refusing to sign: missing private key");
        return Err(TronError::Runtime("Missing private key".to_string()));
    }

    let validated = UnsignedTransaction::from_value(payload)
        .validate()
        .map_err(|e| {
            log::warn!("Refusing to sign transaction: {e}");
            e
        })?;

    let private_key = PrivateKey::from_hex(private_key)?;
    let signed = validated.sign(signer, &private_key)?;
    log::info!("Signed transaction {}", hex_encode(signed.tx_id()));
    Ok(signed.into_value())
}

fn first_signature(payload: &Value) -> Result<RecoverableSignature> {
    let signature = payload
        .get(SIGNATURE_FIELD)
        .and_then(Value::as_array)
        .and_then(|signatures| signatures.first())
        .and_then(Value::as_str)
        .ok_or_else(|| TronError::Validation("Transaction carries no signature".to_string()))?;
    RecoverableSignature::from_hex(signature)
}

fn signed_tx_id(payload: &Value) -> Result<[u8; MESSAGE_HASH_LEN]> {
    let tx_id = payload
        .get(TX_ID_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| TronError::Validation(format!("Transaction is missing {TX_ID_FIELD}")))?;
    let decoded = hex_decode(tx_id)?;
    decoded.as_slice().try_into().map_err(|_| {
        TronError::Validation(format!(
            "{TX_ID_FIELD} must be {MESSAGE_HASH_LEN} bytes, got {}",
            decoded.len()
        ))
    })
}

/// Public key of whoever produced the first signature of a signed payload.
pub fn recover_signer(payload: &Value) -> Result<[u8; PUBLIC_KEY_LEN]> {
    let tx_id = signed_tx_id(payload)?;
    let signature = first_signature(payload)?;
    Secp256k1Signer.recover_public_key(&tx_id, &signature)
}

/// Whether the first signature of a signed payload was made by `public_key`.
pub fn verify_transaction_signature(
    payload: &Value,
    public_key: &[u8; PUBLIC_KEY_LEN],
) -> Result<bool> {
    let tx_id = signed_tx_id(payload)?;
    let signature = first_signature(payload)?;
    Ok(Secp256k1Signer.verify(&tx_id, &signature, public_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecdsa::to_high_s;
    use crate::keccak::keccak256;
    use crate::wallet::KeyPair;
    use serde_json::json;

    fn unsigned_payload() -> Value {
        json!({
            "txID": hex_encode(&keccak256(b"transfer")),
            "raw_data": {
                "contract": [{"type": "TransferContract"}],
                "expiration": 1_700_000_060_000u64,
            },
            "raw_data_hex": "0a02c1f9",
            "visible": false,
        })
    }

    #[test]
    fn test_sign_attaches_single_signature() {
        let key_pair = KeyPair::generate().unwrap();
        let signed =
            sign_transaction(unsigned_payload(), &key_pair.private_key().to_hex()).unwrap();

        let signatures = signed[SIGNATURE_FIELD].as_array().unwrap();
        assert_eq!(signatures.len(), 1);
        assert_eq!(signatures[0].as_str().unwrap().len(), 130);
        assert_eq!(signed[TX_ID_FIELD], unsigned_payload()[TX_ID_FIELD]);
        assert_eq!(signed["visible"], json!(false));
        assert_eq!(signed["raw_data_hex"], json!("0a02c1f9"));

        assert_eq!(&recover_signer(&signed).unwrap(), key_pair.public_key());
        assert!(verify_transaction_signature(&signed, key_pair.public_key()).unwrap());
    }

    #[test]
    fn test_other_key_does_not_verify() {
        let signer = KeyPair::generate().unwrap();
        let stranger = KeyPair::generate().unwrap();
        let signed = sign_transaction(unsigned_payload(), &signer.private_key().to_hex()).unwrap();
        assert!(!verify_transaction_signature(&signed, stranger.public_key()).unwrap());
    }

    #[test]
    fn test_missing_private_key() {
        let err = sign_transaction(unsigned_payload(), "").unwrap_err();
        assert_eq!(err, TronError::Runtime("Missing private key".to_string()));
    }

    #[test]
    fn test_already_signed() {
        let mut payload = unsigned_payload();
        payload[SIGNATURE_FIELD] = json!(["00"]);
        let key_pair = KeyPair::generate().unwrap();
        let err = sign_transaction(payload, &key_pair.private_key().to_hex()).unwrap_err();
        assert_eq!(err, TronError::AlreadySigned);
    }

    #[test]
    fn test_upstream_error_is_surfaced() {
        let payload = json!({"Error": "class org.tron.core.exception.ContractValidateException"});
        let key_pair = KeyPair::generate().unwrap();
        let err = sign_transaction(payload, &key_pair.private_key().to_hex()).unwrap_err();
        assert_eq!(
            err,
            TronError::Runtime("class org.tron.core.exception.ContractValidateException".into())
        );
    }

    #[test]
    fn test_missing_fields() {
        let key = KeyPair::generate().unwrap().private_key().to_hex();

        let mut no_tx_id = unsigned_payload();
        no_tx_id.as_object_mut().unwrap().remove(TX_ID_FIELD);
        assert!(sign_transaction(no_tx_id, &key).unwrap_err().is_runtime());

        let mut no_raw_data = unsigned_payload();
        no_raw_data.as_object_mut().unwrap().remove(RAW_DATA_FIELD);
        assert!(sign_transaction(no_raw_data, &key).unwrap_err().is_runtime());

        assert!(sign_transaction(json!("not an object"), &key)
            .unwrap_err()
            .is_runtime());
    }

    #[test]
    fn test_shape_checked_before_key() {
        // A malformed key must not mask a payload problem.
        let mut payload = unsigned_payload();
        payload.as_object_mut().unwrap().remove(TX_ID_FIELD);
        let err = sign_transaction(payload, "zz").unwrap_err();
        assert_eq!(
            err,
            TronError::Runtime(format!("Transaction is missing {TX_ID_FIELD}"))
        );
    }

    #[test]
    fn test_bad_tx_id_length() {
        let mut payload = unsigned_payload();
        payload[TX_ID_FIELD] = json!("abcd");
        let key = KeyPair::generate().unwrap().private_key().to_hex();
        assert!(sign_transaction(payload, &key).unwrap_err().is_runtime());
    }

    #[test]
    fn test_typestate_pipeline() {
        let key_pair = KeyPair::generate().unwrap();
        let validated = UnsignedTransaction::from_value(unsigned_payload())
            .validate()
            .unwrap();
        assert_eq!(validated.tx_id(), &keccak256(b"transfer"));

        let signed = validated
            .sign(&Secp256k1Signer, key_pair.private_key())
            .unwrap();
        assert_eq!(
            Secp256k1Signer
                .recover_public_key(signed.tx_id(), signed.signature())
                .unwrap(),
            *key_pair.public_key()
        );
        assert!(signed.into_value()[SIGNATURE_FIELD].is_array());
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::to_string(&unsigned_payload()).unwrap();
        assert!(UnsignedTransaction::from_json(&json).unwrap().validate().is_ok());
        assert!(UnsignedTransaction::from_json("{").is_err());
    }

    #[test]
    fn test_high_s_signature_verifies() {
        let key_pair = KeyPair::generate().unwrap();
        let mut signed =
            sign_transaction(unsigned_payload(), &key_pair.private_key().to_hex()).unwrap();

        let low = first_signature(&signed).unwrap();
        signed[SIGNATURE_FIELD] = json!([to_high_s(&low).unwrap().to_hex()]);
        assert!(verify_transaction_signature(&signed, key_pair.public_key()).unwrap());
    }
}
