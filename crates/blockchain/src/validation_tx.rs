//! Inert transactions used only to collect a wallet signature.

use base64::{engine::general_purpose, Engine as _};
use shared::{Error, Result};
use solana_sdk::{
    hash::Hash, message::Message, pubkey::Pubkey, system_instruction, transaction::Transaction,
};

/// A zero-lamport transfer from `signer` to itself, paid by `signer`.
///
/// The returned transaction is unsigned; signature slots hold default values
/// for the wallet to fill in.
pub fn build_validation_transaction(signer: &Pubkey, recent_blockhash: Hash) -> Transaction {
    let instruction = system_instruction::transfer(signer, signer, 0);
    let message = Message::new_with_blockhash(&[instruction], Some(signer), &recent_blockhash);
    Transaction::new_unsigned(message)
}

/// Wire-format bytes of `transaction`, base64 encoded
pub fn encode_transaction(transaction: &Transaction) -> Result<String> {
    let bytes = bincode::serialize(transaction)
        .map_err(|e| Error::Serialization(format!("Failed to serialize transaction: {}", e)))?;
    Ok(general_purpose::STANDARD.encode(bytes))
}

pub fn validation_transaction_base64(signer: &Pubkey, recent_blockhash: Hash) -> Result<String> {
    encode_transaction(&build_validation_transaction(signer, recent_blockhash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{signature::Signature, system_instruction::SystemInstruction, system_program};

    #[test]
    fn test_self_transfer_of_zero_lamports() {
        let signer = Pubkey::new_unique();
        let blockhash = Hash::new_unique();
        let tx = build_validation_transaction(&signer, blockhash);

        assert_eq!(tx.message.instructions.len(), 1);
        assert_eq!(tx.message.recent_blockhash, blockhash);
        assert_eq!(tx.message.account_keys, vec![signer, system_program::id()]);
        assert_eq!(tx.message.header.num_required_signatures, 1);

        let instruction = &tx.message.instructions[0];
        assert_eq!(tx.message.account_keys[instruction.program_id_index as usize], system_program::id());

        let decoded: SystemInstruction = bincode::deserialize(&instruction.data).unwrap();
        assert_eq!(decoded, SystemInstruction::Transfer { lamports: 0 });
    }

    #[test]
    fn test_transaction_is_unsigned() {
        let signer = Pubkey::new_unique();
        let tx = build_validation_transaction(&signer, Hash::new_unique());
        assert_eq!(tx.signatures, vec![Signature::default()]);
    }

    #[test]
    fn test_base64_round_trip() {
        let signer = Pubkey::new_unique();
        let blockhash = Hash::new_unique();
        let encoded = validation_transaction_base64(&signer, blockhash).unwrap();

        let bytes = general_purpose::STANDARD.decode(encoded).unwrap();
        let tx: Transaction = bincode::deserialize(&bytes).unwrap();
        assert_eq!(tx, build_validation_transaction(&signer, blockhash));
        assert_eq!(tx.message.account_keys[0], signer);
    }
}
