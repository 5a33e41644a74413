//! `fmt`: re-serialize a file through the writer.

use cif_dict::write_cif;

use super::load;
use crate::CliOptions;

/// Print the normalized form of `path` to stdout.
///
/// Comments, layout and garbage values are dropped; every loop column
/// becomes its own single-column loop.
pub fn format_file(path: &str, options: &CliOptions) {
    let output = load(path, options);
    print!("{}", write_cif(&output.document));
}
