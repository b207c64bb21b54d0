//! rsacert: chunked RSA encryption CLI
//!
//! Commands:
//!   keygen                   - generate a keypair and write both key files
//!   encrypt / decrypt        - chunked RSA over a file (or stdin → stdout)
//!   encrypt-text <message>   - encrypt a UTF-8 message
//!   decrypt-text             - decrypt a message and print it
//!   inspect <key-file>       - show modulus and block sizes of a key file
//!   config show              - display current configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use rsacert_core::config::CertConfig;
use rsacert_core::{KeyEncoding, KeySlot};
use rsacert_crypto::{io, load_key, BlockPolicy, RsaCert};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "rsacert",
    version,
    about = "Chunked RSA encryption of files and messages",
    long_about = "rsacert: generate RSA keypairs and encrypt/decrypt payloads of any length \
                  with RSA PKCS#1 v1.5, one modulus-sized block per segment"
)]
struct Cli {
    /// Path to rsacert.toml configuration file
    #[arg(
        long,
        short = 'c',
        global = true,
        env = "RSACERT_CONFIG",
        default_value = "~/.config/rsacert/config.toml"
    )]
    config: PathBuf,

    /// Key file encoding (overrides config)
    #[arg(long, global = true, env = "RSACERT_KEY_ENCODING")]
    encoding: Option<KeyEncoding>,

    /// Log level (trace, debug, info, warn, error; overrides config)
    #[arg(long, global = true, env = "RSACERT_LOG")]
    log: Option<String>,

    /// Log format (overrides config)
    #[arg(long, global = true, env = "RSACERT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new RSA keypair and write the public and private key files
    Keygen {
        /// Modulus size in bits (default: keys.bits from config, 1024)
        #[arg(long, short = 'b')]
        bits: Option<usize>,
        /// Public key output path (default: keys.public_key, else ./public.<encoding>)
        #[arg(long)]
        public: Option<PathBuf>,
        /// Private key output path (default: keys.private_key, else ./private.<encoding>)
        #[arg(long)]
        private: Option<PathBuf>,
        /// Overwrite existing key files
        #[arg(long)]
        force: bool,
    },

    /// Encrypt a file (or stdin) with the public key
    Encrypt {
        /// Public key file (overrides config)
        #[arg(long)]
        public: Option<PathBuf>,
        /// Plaintext input (default: stdin)
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,
        /// Ciphertext output (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Decrypt a file (or stdin) with the private key
    Decrypt {
        /// Private key file (overrides config)
        #[arg(long)]
        private: Option<PathBuf>,
        /// Ciphertext input (default: stdin)
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,
        /// Plaintext output (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Encrypt a UTF-8 message given on the command line
    #[command(name = "encrypt-text")]
    EncryptText {
        message: String,
        /// Public key file (overrides config)
        #[arg(long)]
        public: Option<PathBuf>,
        /// Ciphertext output (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Decrypt a message and print it
    #[command(name = "decrypt-text")]
    DecryptText {
        /// Private key file (overrides config)
        #[arg(long)]
        private: Option<PathBuf>,
        /// Ciphertext input (default: stdin)
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,
    },

    /// Show modulus size and segment sizes of a key file
    Inspect {
        /// Key file to inspect
        key: PathBuf,
        /// Which half of the keypair the file holds
        #[arg(long, short = 's')]
        slot: KeySlot,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file + flags)
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = expand_tilde(&cli.config);
    let mut config = load_config(&config_path)?;
    apply_overrides(&mut config, &cli);

    init_logging(&config.log.level, &log_format(&config, cli.log_format.as_ref()));
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "rsacert starting"
    );

    match cli.command {
        Commands::Keygen { bits, public, private, force } => {
            cmd_keygen(&config, bits, public, private, force)
        }
        Commands::Encrypt { public, input, output } => {
            cmd_encrypt(&config, public, input.as_deref(), output.as_deref())
        }
        Commands::Decrypt { private, input, output } => {
            cmd_decrypt(&config, private, input.as_deref(), output.as_deref())
        }
        Commands::EncryptText { message, public, output } => {
            cmd_encrypt_text(&config, &message, public, output.as_deref())
        }
        Commands::DecryptText { private, input } => {
            cmd_decrypt_text(&config, private, input.as_deref())
        }
        Commands::Inspect { key, slot, json } => cmd_inspect(&config, &key, slot, json),
        Commands::Config { action: ConfigAction::Show } => cmd_config_show(&config, &config_path),
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<CertConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config: {}", path.display()))
    } else {
        Ok(CertConfig::default())
    }
}

/// Fold global command-line flags into the loaded configuration.
fn apply_overrides(config: &mut CertConfig, cli: &Cli) {
    if let Some(encoding) = cli.encoding {
        config.keys.encoding = encoding;
    }
    if let Some(level) = &cli.log {
        config.log.level = level.clone();
    }
}

fn log_format(config: &CertConfig, flag: Option<&LogFormat>) -> LogFormat {
    flag.cloned()
        .or_else(|| LogFormat::from_str(&config.log.format, true).ok())
        .unwrap_or(LogFormat::Text)
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries ciphertext/plaintext, so logs go to stderr.
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Expand `~` in path to the user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_default();
        PathBuf::from(home).join(rest)
    } else {
        path.to_path_buf()
    }
}

/// Resolve a key file: CLI flag > config > error
fn resolve_key_path(config: &CertConfig, slot: KeySlot, flag: Option<PathBuf>) -> Result<PathBuf> {
    flag.or_else(|| config.keys.path(slot).cloned())
        .map(|p| expand_tilde(&p))
        .with_context(|| {
            format!(
                "no {slot} key file given\n\
                 Pass --{slot} <PATH> or set keys.{slot}_key in the config file."
            )
        })
}

fn load_cert(config: &CertConfig, slot: KeySlot, flag: Option<PathBuf>) -> Result<RsaCert> {
    let path = resolve_key_path(config, slot, flag)?;
    RsaCert::from_key_file(&path, slot, config.keys.encoding)
        .with_context(|| format!("loading {slot} key: {}", path.display()))
}

// ── Payload I/O ───────────────────────────────────────────────────────────────

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    match input {
        Some(path) => io::read_all(path).with_context(|| format!("reading {}", path.display())),
        None => io::read_all_from(std::io::stdin().lock()).context("reading stdin"),
    }
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => io::write_all(path, bytes).with_context(|| format!("writing {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("writing stdout")?;
            stdout.flush().context("flushing stdout")
        }
    }
}

// ── `rsacert keygen` ──────────────────────────────────────────────────────────

fn cmd_keygen(
    config: &CertConfig,
    bits: Option<usize>,
    public: Option<PathBuf>,
    private: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let bits = bits.unwrap_or(config.keys.bits);
    let encoding = config.keys.encoding;
    let public = keygen_path(config, KeySlot::Public, public);
    let private = keygen_path(config, KeySlot::Private, private);

    if !force {
        for path in [&public, &private] {
            if path.exists() {
                anyhow::bail!(
                    "refusing to overwrite existing key file: {}\nPass --force to replace it.",
                    path.display()
                );
            }
        }
    }

    let cert = RsaCert::generate_with_bits(bits)
        .with_context(|| format!("generating {bits}-bit RSA keypair"))?;
    // Private key first; it is removed again if the public write fails.
    cert.save_key(&private, KeySlot::Private, encoding)
        .with_context(|| format!("writing private key: {}", private.display()))?;
    if let Err(e) = cert.save_key(&public, KeySlot::Public, encoding) {
        let _ = std::fs::remove_file(&private);
        return Err(e).with_context(|| format!("writing public key: {}", public.display()));
    }

    info!(bits, %encoding, "keypair written");
    println!("Generated {bits}-bit RSA keypair ({encoding})");
    println!("  public:  {}", public.display());
    println!("  private: {}", private.display());
    Ok(())
}

/// Output path for a generated key: CLI flag > config > `./<slot>.<encoding>`
fn keygen_path(config: &CertConfig, slot: KeySlot, flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| config.keys.path(slot).cloned())
        .map(|p| expand_tilde(&p))
        .unwrap_or_else(|| PathBuf::from(format!("{slot}.{}", config.keys.encoding)))
}

// ── `rsacert encrypt` / `rsacert decrypt` ─────────────────────────────────────

fn cmd_encrypt(
    config: &CertConfig,
    public: Option<PathBuf>,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let cert = load_cert(config, KeySlot::Public, public)?;
    let plaintext = read_input(input)?;
    let ciphertext = cert.encode_data(&plaintext).context("encrypting payload")?;
    write_output(output, &ciphertext)?;

    if let Some(path) = output {
        println!(
            "Encrypted {} → {} ({})",
            fmt_bytes(plaintext.len() as u64),
            fmt_bytes(ciphertext.len() as u64),
            path.display()
        );
    }
    Ok(())
}

fn cmd_decrypt(
    config: &CertConfig,
    private: Option<PathBuf>,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let cert = load_cert(config, KeySlot::Private, private)?;
    let ciphertext = read_input(input)?;
    let plaintext = cert.decode_data(&ciphertext).context("decrypting payload")?;
    write_output(output, &plaintext)?;

    if let Some(path) = output {
        println!(
            "Decrypted {} → {} ({})",
            fmt_bytes(ciphertext.len() as u64),
            fmt_bytes(plaintext.len() as u64),
            path.display()
        );
    }
    Ok(())
}

// ── `rsacert encrypt-text` / `rsacert decrypt-text` ───────────────────────────

fn cmd_encrypt_text(
    config: &CertConfig,
    message: &str,
    public: Option<PathBuf>,
    output: Option<&Path>,
) -> Result<()> {
    let cert = load_cert(config, KeySlot::Public, public)?;
    let ciphertext = cert.encode_text(message).context("encrypting message")?;
    write_output(output, &ciphertext)
}

fn cmd_decrypt_text(config: &CertConfig, private: Option<PathBuf>, input: Option<&Path>) -> Result<()> {
    let cert = load_cert(config, KeySlot::Private, private)?;
    let ciphertext = read_input(input)?;
    let message = cert.decode_text(&ciphertext).context("decrypting message")?;
    println!("{message}");
    Ok(())
}

// ── `rsacert inspect` ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct KeyInfo {
    slot: KeySlot,
    encoding: KeyEncoding,
    modulus_bits: usize,
    modulus_bytes: usize,
    plaintext_block_size: usize,
    ciphertext_block_size: usize,
}

fn key_info(bytes: &[u8], slot: KeySlot, encoding: KeyEncoding) -> Result<KeyInfo> {
    let key = load_key(bytes, slot, encoding)?;
    let policy = BlockPolicy::for_modulus(slot, key.modulus_bytes())?;
    Ok(KeyInfo {
        slot,
        encoding,
        modulus_bits: key.modulus_bits(),
        modulus_bytes: key.modulus_bytes(),
        plaintext_block_size: policy.plaintext_block_size(),
        ciphertext_block_size: policy.ciphertext_block_size(),
    })
}

fn cmd_inspect(config: &CertConfig, key: &Path, slot: KeySlot, json: bool) -> Result<()> {
    let path = expand_tilde(key);
    let bytes = io::read_all(&path).with_context(|| format!("reading {}", path.display()))?;
    let info = key_info(&bytes, slot, config.keys.encoding)
        .with_context(|| format!("inspecting {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info).context("serializing key info")?);
    } else {
        println!("{}", path.display());
        println!("  slot:       {} ({})", info.slot, info.encoding);
        println!("  modulus:    {} bits ({} bytes)", info.modulus_bits, info.modulus_bytes);
        println!("  plaintext:  {} bytes per segment", info.plaintext_block_size);
        println!("  ciphertext: {} bytes per segment", info.ciphertext_block_size);
    }
    Ok(())
}

// ── `rsacert config show` ─────────────────────────────────────────────────────

fn cmd_config_show(config: &CertConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!("# Configuration: defaults (no file at {})", config_path.display());
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}

fn fmt_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_keygen_flags() {
        let cli = Cli::parse_from([
            "rsacert", "--encoding", "pem", "keygen", "--bits", "2048", "--public", "a.pem",
        ]);
        assert_eq!(cli.encoding, Some(KeyEncoding::Pem));
        match cli.command {
            Commands::Keygen { bits, public, private, force } => {
                assert_eq!(bits, Some(2048));
                assert_eq!(public, Some(PathBuf::from("a.pem")));
                assert!(private.is_none());
                assert!(!force);
            }
            other => panic!("parsed wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_inspect_slot() {
        let cli = Cli::parse_from(["rsacert", "inspect", "decode.cer", "--slot", "private"]);
        assert!(matches!(
            cli.command,
            Commands::Inspect { slot: KeySlot::Private, json: false, .. }
        ));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde(Path::new("~/.config/rsacert/config.toml"));
        assert!(!expanded.to_string_lossy().starts_with("~/"));
        assert_eq!(expand_tilde(Path::new("/etc/x")), PathBuf::from("/etc/x"));
    }

    #[test]
    fn test_resolve_key_path_precedence() {
        let mut config = CertConfig::default();
        assert!(resolve_key_path(&config, KeySlot::Public, None).is_err());

        config.keys.public_key = Some(PathBuf::from("/cfg/public.der"));
        assert_eq!(
            resolve_key_path(&config, KeySlot::Public, None).unwrap(),
            PathBuf::from("/cfg/public.der")
        );
        assert_eq!(
            resolve_key_path(&config, KeySlot::Public, Some(PathBuf::from("/flag.der"))).unwrap(),
            PathBuf::from("/flag.der")
        );
        // The other slot is not satisfied by the public entry.
        assert!(resolve_key_path(&config, KeySlot::Private, None).is_err());
    }

    #[test]
    fn test_load_config_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.keys.bits, 1024);
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[keys\nbits = ").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_log_format_resolution() {
        let mut config = CertConfig::default();
        assert!(matches!(log_format(&config, None), LogFormat::Text));
        config.log.format = "JSON".into();
        assert!(matches!(log_format(&config, None), LogFormat::Json));
        assert!(matches!(log_format(&config, Some(&LogFormat::Text)), LogFormat::Text));
        config.log.format = "yaml".into();
        assert!(matches!(log_format(&config, None), LogFormat::Text));
    }

    #[test]
    fn test_key_info_and_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public.der");
        let plain = dir.path().join("plain.bin");
        let sealed = dir.path().join("sealed.bin");

        let cert = RsaCert::generate().unwrap();
        cert.save_key(&public, KeySlot::Public, KeyEncoding::Der).unwrap();

        let info = key_info(&std::fs::read(&public).unwrap(), KeySlot::Public, KeyEncoding::Der).unwrap();
        assert_eq!(info.modulus_bits, 1024);
        assert_eq!(info.plaintext_block_size, 117);
        assert_eq!(info.ciphertext_block_size, 128);

        let mut config = CertConfig::default();
        config.keys.public_key = Some(public);
        std::fs::write(&plain, vec![1u8; 300]).unwrap();
        cmd_encrypt(&config, None, Some(&plain), Some(&sealed)).unwrap();

        let ciphertext = std::fs::read(&sealed).unwrap();
        assert_eq!(ciphertext.len(), 3 * 128);
        assert_eq!(cert.decode_data(&ciphertext).unwrap(), vec![1u8; 300]);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rsacert", "keygen", "--config", "x.toml", "--log", "debug", "--log-format", "json",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        assert_eq!(cli.log.as_deref(), Some("debug"));
        assert!(matches!(cli.log_format, Some(LogFormat::Json)));

        let cli = Cli::try_parse_from(["rsacert", "config", "show", "-c", "y.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("y.toml"));
    }

    #[test]
    fn test_keygen_path_defaults() {
        let mut config = CertConfig::default();
        assert_eq!(keygen_path(&config, KeySlot::Public, None), PathBuf::from("public.der"));
        assert_eq!(keygen_path(&config, KeySlot::Private, None), PathBuf::from("private.der"));

        config.keys.encoding = KeyEncoding::Pem;
        assert_eq!(keygen_path(&config, KeySlot::Private, None), PathBuf::from("private.pem"));

        config.keys.private_key = Some(PathBuf::from("/cfg/decode.pem"));
        assert_eq!(
            keygen_path(&config, KeySlot::Private, None),
            PathBuf::from("/cfg/decode.pem")
        );
        assert_eq!(
            keygen_path(&config, KeySlot::Private, Some(PathBuf::from("/flag.pem"))),
            PathBuf::from("/flag.pem")
        );
    }

    #[test]
    fn test_keygen_requires_force_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public.der");
        let private = dir.path().join("private.der");
        std::fs::write(&public, b"existing").unwrap();

        let config = CertConfig::default();
        let err = cmd_keygen(&config, None, Some(public.clone()), Some(private.clone()), false);
        assert!(err.is_err());
        assert_eq!(std::fs::read(&public).unwrap(), b"existing");
        assert!(!private.exists());

        cmd_keygen(&config, None, Some(public.clone()), Some(private.clone()), true).unwrap();
        let key = std::fs::read(&public).unwrap();
        assert_ne!(key, b"existing");
        assert!(load_key(&key, KeySlot::Public, KeyEncoding::Der).is_ok());
        assert!(private.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_keygen_private_key_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public.der");
        let private = dir.path().join("private.der");
        cmd_keygen(&CertConfig::default(), None, Some(public), Some(private.clone()), false).unwrap();

        let mode = std::fs::metadata(&private).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_keygen_failure_leaves_no_key_files() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("missing-dir").join("public.der");
        let private = dir.path().join("private.der");

        let result = cmd_keygen(&CertConfig::default(), None, Some(public.clone()), Some(private.clone()), false);
        assert!(result.is_err());
        assert!(!public.exists());
        assert!(!private.exists());
    }

    #[test]
    fn test_text_commands_roundtrip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public.pem");
        let private = dir.path().join("private.pem");
        let sealed = dir.path().join("message.bin");

        let mut config = CertConfig::default();
        config.keys.encoding = KeyEncoding::Pem;
        cmd_keygen(&config, None, Some(public.clone()), Some(private.clone()), false).unwrap();

        config.keys.public_key = Some(public);
        cmd_encrypt_text(&config, "1234567890北京掌舵者科技有限公司0987654321", None, Some(&sealed)).unwrap();
        assert_eq!(std::fs::read(&sealed).unwrap().len() % 128, 0);

        // No private key configured yet.
        assert!(cmd_decrypt_text(&config, None, Some(&sealed)).is_err());
        cmd_decrypt_text(&config, Some(private.clone()), Some(&sealed)).unwrap();

        let cert = RsaCert::from_key_file(&private, KeySlot::Private, KeyEncoding::Pem).unwrap();
        let message = cert.decode_text(&std::fs::read(&sealed).unwrap()).unwrap();
        assert_eq!(message, "1234567890北京掌舵者科技有限公司0987654321");
    }

    #[test]
    fn test_fmt_bytes() {
        assert_eq!(fmt_bytes(512), "512 B");
        assert_eq!(fmt_bytes(2048), "2.0 KB");
        assert_eq!(fmt_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
