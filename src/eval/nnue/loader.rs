use anyhow::{bail, ensure, Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::features::halfkp_dim;
use super::network::Network;

pub const NET_MAGIC: &[u8; 8] = b"BLNDNN01";
pub const NET_VERSION: u32 = 1;
/// Widest feature transformer a network file may declare.
pub const MAX_HIDDEN_DIM: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkMeta {
    pub version: u32,
    pub input_dim: usize,
    pub hidden_dim: usize,
}

fn read_u32<R: Read>(r: &mut R, what: &str) -> Result<u32> {
    let mut b4 = [0u8; 4];
    r.read_exact(&mut b4).with_context(|| format!("read {}", what))?;
    Ok(u32::from_le_bytes(b4))
}

/// Read exactly `n * width` bytes. The buffer grows with the data actually
/// present, so a lying header cannot force a huge allocation.
fn read_block<R: Read>(r: &mut R, n: usize, width: usize, what: &str) -> Result<Vec<u8>> {
    let len = n.checked_mul(width).with_context(|| format!("{} size overflows", what))?;
    let mut buf = Vec::new();
    r.by_ref().take(len as u64).read_to_end(&mut buf).with_context(|| format!("read {}", what))?;
    ensure!(buf.len() == len, "read {}: truncated ({} of {} bytes)", what, buf.len(), len);
    Ok(buf)
}

fn read_i16s<R: Read>(r: &mut R, n: usize, what: &str) -> Result<Vec<i16>> {
    let buf = read_block(r, n, 2, what)?;
    Ok(buf.chunks_exact(2).map(|c| i16::from_le_bytes([c[0], c[1]])).collect())
}

fn read_i32s<R: Read>(r: &mut R, n: usize, what: &str) -> Result<Vec<i32>> {
    let buf = read_block(r, n, 4, what)?;
    Ok(buf.chunks_exact(4).map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect())
}

impl Network {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        // Format (little endian):
        // magic: 8 bytes b"BLNDNN01"
        // u32 version, u32 input_dim, u32 hidden_dim
        // i16 ft_weights[input_dim * hidden_dim] (feature-major)
        // i16 ft_biases[hidden_dim]
        // i32 psqt_weights[input_dim]
        // i16 out_weights[2 * hidden_dim] (us, them)
        // i32 out_bias
        let f = File::open(&path).with_context(|| format!("open nnue file: {}", path.as_ref().display()))?;
        Self::from_reader(&mut BufReader::new(f))
    }

    pub fn from_reader<R: Read>(r: &mut R) -> Result<Self> {
        let mut magic = [0u8; 8];
        r.read_exact(&mut magic).context("read magic")?;
        if &magic != NET_MAGIC { bail!("bad NNUE magic"); }
        let version = read_u32(r, "version")?;
        if version != NET_VERSION { bail!("unsupported NNUE version {}", version); }
        let input_dim = read_u32(r, "input_dim")? as usize;
        let hidden_dim = read_u32(r, "hidden_dim")? as usize;
        ensure!(input_dim == halfkp_dim(), "input_dim {} does not match HalfKP dim {}", input_dim, halfkp_dim());
        ensure!(hidden_dim > 0, "hidden_dim must be non-zero");
        ensure!(hidden_dim <= MAX_HIDDEN_DIM, "hidden_dim {} exceeds limit {}", hidden_dim, MAX_HIDDEN_DIM);

        let ft_len = input_dim.checked_mul(hidden_dim).context("ft_weights size overflows")?;
        let ft_weights = read_i16s(r, ft_len, "ft_weights")?;
        let ft_biases = read_i16s(r, hidden_dim, "ft_biases")?;
        let psqt_weights = read_i32s(r, input_dim, "psqt_weights")?;
        let out_weights = read_i16s(r, 2 * hidden_dim, "out_weights")?;
        let out_bias = read_i32s(r, 1, "out_bias")?[0];

        let mut rest = [0u8; 1];
        if r.read(&mut rest).context("check trailing bytes")? != 0 { bail!("trailing bytes after NNUE payload"); }

        Ok(Self {
            meta: NetworkMeta { version, input_dim, hidden_dim },
            ft_weights, ft_biases, psqt_weights, out_weights, out_bias,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let f = File::create(&path).with_context(|| format!("create nnue file: {}", path.as_ref().display()))?;
        let mut w = BufWriter::new(f);
        self.write_to(&mut w)?;
        w.flush().context("flush nnue file")
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(NET_MAGIC)?;
        w.write_all(&self.meta.version.to_le_bytes())?;
        w.write_all(&(self.meta.input_dim as u32).to_le_bytes())?;
        w.write_all(&(self.meta.hidden_dim as u32).to_le_bytes())?;
        for v in &self.ft_weights { w.write_all(&v.to_le_bytes())?; }
        for v in &self.ft_biases { w.write_all(&v.to_le_bytes())?; }
        for v in &self.psqt_weights { w.write_all(&v.to_le_bytes())?; }
        for v in &self.out_weights { w.write_all(&v.to_le_bytes())?; }
        w.write_all(&self.out_bias.to_le_bytes())?;
        Ok(())
    }
}
