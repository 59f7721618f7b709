//! Weight export for external inference engines.
//!
//! Besides the safetensors checkpoint every parameter is written to its own
//! text file, named after the parameter with `.` replaced by `_`
//! (`model.0.weight` → `model_0_weight.txt`). A file holds the row-major
//! flattened values on one line, separated by commas.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use candle_nn::VarMap;

use crate::{
    error::{KwsError, Result},
    nn::named_parameters,
};

/// Save every variable of `varmap` as safetensors.
pub fn save_checkpoint(varmap: &VarMap, path: &Path) -> Result<()> {
    varmap.save(path)?;
    Ok(())
}

/// `model.0.weight` → `model_0_weight`
pub fn export_stem(name: &str) -> String {
    name.replace('.', "_")
}

fn write_values<T>(
    path: &Path,
    values: impl IntoIterator<Item = T>,
    fmt: impl Fn(&mut BufWriter<File>, T) -> std::io::Result<()>,
) -> Result<()> {
    let file = File::create(path).map_err(|e| KwsError::io(path, e))?;
    let mut out = BufWriter::new(file);
    let emit = |out: &mut BufWriter<File>| -> std::io::Result<()> {
        for (i, v) in values.into_iter().enumerate() {
            if i > 0 {
                out.write_all(b",")?;
            }
            fmt(out, v)?;
        }
        out.write_all(b"\n")?;
        out.flush()
    };
    emit(&mut out).map_err(|e| KwsError::io(path, e))
}

/// Write one text file per parameter into `dir`; with `binarized` also a
/// `<stem>_binarized.txt` holding `1` / `-1` per value. Returns the written
/// paths in parameter-name order.
pub fn export_text_weights(varmap: &VarMap, dir: &Path, binarized: bool) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| KwsError::io(dir, e))?;

    let mut written = Vec::new();
    for (name, var) in named_parameters(varmap) {
        let values = var.flatten_all()?.to_vec1::<f32>()?;
        let stem = export_stem(&name);

        let path = dir.join(format!("{stem}.txt"));
        write_values(&path, values.iter().copied(), |out, v| write!(out, "{v:.8e}"))?;
        written.push(path);

        if binarized {
            let path = dir.join(format!("{stem}_binarized.txt"));
            let signs = values.iter().map(|&v| if v >= 0.0 { 1i8 } else { -1 });
            write_values(&path, signs, |out, v| write!(out, "{v}"))?;
            written.push(path);
        }
    }
    Ok(written)
}

/* ---------------------------------------------------------------------- */
/*  Unit-tests                                                            */
/* ---------------------------------------------------------------------- */
