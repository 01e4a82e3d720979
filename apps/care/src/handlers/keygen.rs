use anyhow::Result;
use rcfg::signing::encode_key;
use rcfg::signing::generator::generate_keypair;
use zeroize::Zeroize;

/// Prints a fresh base64 key pair.
///
/// The public key goes into `care.toml` or the app; the private key stays with whoever signs.
///
/// # Errors
/// Returns an error if the system RNG is unavailable.
pub fn create_key_pair() -> Result<()> {
    let (signing_key, verifying_key) = generate_keypair()?;

    let mut secret = signing_key.to_bytes();
    let private_key = encode_key(&secret);
    secret.zeroize();

    println!("The public key is \"{}\"", encode_key(verifying_key.as_bytes()));
    println!("The private key is \"{private_key}\"");

    Ok(())
}
