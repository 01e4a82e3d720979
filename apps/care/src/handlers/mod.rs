pub mod init;
pub mod keygen;
pub mod prepare;
pub mod resolve;
pub mod verify;
