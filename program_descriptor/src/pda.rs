use solana_sdk::pubkey::Pubkey;

///Program-derived address for `[seed, owner]` under `program_id`.
///
///Deterministic: the same triple always yields the same address and bump.
pub fn derive_address(seed: &str, owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seed.as_bytes(), owner.as_ref()], program_id)
}
