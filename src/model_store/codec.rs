use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use std::io::{self, Read, Write};

use crate::{
    common::constants::{
        ABSENT_PIVOT,
        MODEL_MAGIC,
        MODEL_VERSION,
    },
    BoostingClassifier,
    ClassifierCustomizer,
    Discretization,
    DiscretizationBin,
    Bins,
    HypothesisData,
    CategoryId,
    TextBoostError,
    Result,
};
use super::storage::StorageManager;


/// Writes and reads a [`BoostingClassifier`] to/from a [`StorageManager`].
///
/// # Example
/// ```
/// use textboost::prelude::*;
///
/// let disc = Discretization::new(vec![Bins::from_boundaries(&[0.0, 1.0])])
///     .unwrap();
/// let rounds = vec![vec![HypothesisData::new(Some(0), -0.5, vec![0.5])]];
/// let f = BoostingClassifier::from_rounds(1, disc, rounds);
///
/// let storage = MemoryStorage::new();
/// ModelStore::write(&storage, "model", &f).unwrap();
/// let g = ModelStore::read(&storage, "model").unwrap();
/// assert_eq!(f.rounds(), g.rounds());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ModelStore;


struct Header {
    n_categories: usize,
    n_features: usize,
}


impl ModelStore {
    /// Returns the name of the header resource of model `name`.
    pub fn header_resource(name: &str) -> String {
        format!("{name}.header")
    }


    /// Returns the name of the discretization resource of model `name`.
    pub fn discretization_resource(name: &str) -> String {
        format!("{name}.discretization")
    }


    /// Returns the name of the resource holding
    /// the hypotheses of `category`.
    pub fn category_resource(name: &str, category: CategoryId) -> String {
        format!("{name}.category.{category}")
    }


    /// Returns the name of the customizer resource of model `name`.
    pub fn customizer_resource(name: &str) -> String {
        format!("{name}.customizer")
    }


    /// Write `classifier` as model `name`.
    /// Every stored round is written, regardless of the active count.
    /// A failure part way leaves the resources written so far.
    pub fn write<S>(
        storage: &S,
        name: &str,
        classifier: &BoostingClassifier,
    ) -> Result<()>
        where S: StorageManager + ?Sized,
    {
        use crate::Classifier;

        let n_categories = classifier.n_categories();
        let disc = classifier.discretization();
        let n_rounds = classifier.n_rounds();

        let mut out = storage.output_stream(&Self::header_resource(name))?;
        out.write_all(MODEL_MAGIC)?;
        out.write_u8(MODEL_VERSION)?;
        out.write_u32::<LittleEndian>(to_u32(n_categories)?)?;
        out.write_u32::<LittleEndian>(to_u32(disc.n_features())?)?;
        out.flush()?;
        drop(out);

        let mut out = storage.output_stream(&Self::discretization_resource(name))?;
        write_discretization(&mut out, disc)?;
        out.write_u32::<LittleEndian>(to_u32(n_rounds)?)?;
        out.flush()?;
        drop(out);

        for cat in 0..n_categories {
            let resource = Self::category_resource(name, cat);
            let mut out = storage.output_stream(&resource)?;
            out.write_u32::<LittleEndian>(to_u32(n_rounds)?)?;
            for h in classifier.hypotheses(cat) {
                write_hypothesis(&mut out, h)?;
            }
            out.flush()?;
        }

        tracing::info!(
            model = name, n_categories, n_rounds, "model written"
        );
        Ok(())
    }


    /// Read model `name`.
    ///
    /// A category stream ends at its declared round count or at the end
    /// of the stream, whichever comes first.
    /// Rounds missing from a category stream are read as abstaining
    /// hypotheses; rounds beyond the global round count are ignored.
    /// A global round count that no category stream reaches,
    /// or a feature count that disagrees between header and bins,
    /// gives [`TextBoostError::InvalidModel`].
    /// The active iteration count of the returned classifier
    /// covers every round.
    pub fn read<S>(storage: &S, name: &str) -> Result<BoostingClassifier>
        where S: StorageManager + ?Sized,
    {
        let mut input = storage.input_stream(&Self::header_resource(name))?;
        let header = read_header(&mut input, name)?;
        drop(input);

        let mut input = storage.input_stream(&Self::discretization_resource(name))?;
        let disc = read_discretization(&mut input, name, header.n_features)?;
        let n_rounds = input.read_u32::<LittleEndian>()? as usize;
        drop(input);

        // Counts come from disk: vectors grow with the data actually read.
        let max_bins = disc.max_bins();
        let mut per_category = Vec::new();
        for cat in 0..header.n_categories {
            let resource = Self::category_resource(name, cat);
            let mut input = storage.input_stream(&resource)?;
            let hypotheses = read_category(
                &mut input, name, header.n_features, max_bins
            )?;
            if hypotheses.len() != n_rounds {
                tracing::warn!(
                    model = name,
                    category = cat,
                    stored = hypotheses.len(),
                    expected = n_rounds,
                    "category round count disagrees with the model"
                );
            }
            per_category.push(hypotheses);
        }

        let longest = per_category.iter().map(Vec::len).max().unwrap_or(0);
        if n_rounds > longest {
            return Err(invalid(name, format!(
                "{n_rounds} rounds declared, no category stores more than {longest}"
            )));
        }

        let rounds = (0..n_rounds)
            .map(|r| {
                per_category.iter()
                    .map(|hs| {
                        hs.get(r)
                            .cloned()
                            .unwrap_or_else(|| HypothesisData::absent(max_bins))
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        tracing::info!(
            model = name,
            n_categories = header.n_categories,
            n_rounds,
            "model read"
        );
        Ok(BoostingClassifier::from_rounds(header.n_categories, disc, rounds))
    }


    /// Write `customizer` as JSON next to model `name`.
    pub fn write_customizer<S>(
        storage: &S,
        name: &str,
        customizer: &ClassifierCustomizer,
    ) -> Result<()>
        where S: StorageManager + ?Sized,
    {
        let mut out = storage.output_stream(&Self::customizer_resource(name))?;
        customizer.to_writer(&mut out)?;
        out.flush()?;
        Ok(())
    }


    /// Read the customizer of model `name`.
    pub fn read_customizer<S>(storage: &S, name: &str)
        -> Result<ClassifierCustomizer>
        where S: StorageManager + ?Sized,
    {
        let input = storage.input_stream(&Self::customizer_resource(name))?;
        ClassifierCustomizer::from_reader(input)
    }
}


fn invalid(name: &str, reason: String) -> TextBoostError {
    TextBoostError::InvalidModel { name: name.to_string(), reason }
}


fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        let message = format!("{value} does not fit in the model format");
        io::Error::new(io::ErrorKind::InvalidInput, message).into()
    })
}


fn read_header<R: Read>(input: &mut R, name: &str) -> Result<Header> {
    let mut magic = [0u8; 4];
    input.read_exact(&mut magic)?;
    if &magic != MODEL_MAGIC {
        return Err(invalid(name, format!("unknown magic {magic:?}")));
    }
    let version = input.read_u8()?;
    if version != MODEL_VERSION {
        return Err(invalid(name, format!("unsupported version {version}")));
    }
    let n_categories = input.read_u32::<LittleEndian>()? as usize;
    let n_features = input.read_u32::<LittleEndian>()? as usize;
    Ok(Header { n_categories, n_features })
}


fn write_discretization<W: Write>(out: &mut W, disc: &Discretization)
    -> Result<()>
{
    out.write_u32::<LittleEndian>(to_u32(disc.n_features())?)?;
    for bins in disc.iter() {
        out.write_u32::<LittleEndian>(to_u32(bins.len())?)?;
        for bin in bins {
            out.write_f64::<LittleEndian>(bin.start())?;
            out.write_f64::<LittleEndian>(bin.end())?;
        }
    }
    Ok(())
}


fn read_discretization<R: Read>(
    input: &mut R,
    name: &str,
    n_features: usize,
) -> Result<Discretization>
{
    let stored = input.read_u32::<LittleEndian>()? as usize;
    if stored != n_features {
        return Err(invalid(name, format!(
            "header declares {n_features} features, discretization has {stored}"
        )));
    }
    let mut all = Vec::new();
    for feature in 0..n_features {
        let n_bins = input.read_u32::<LittleEndian>()? as usize;
        let mut bins = Vec::new();
        for _ in 0..n_bins {
            let start = input.read_f64::<LittleEndian>()?;
            let end = input.read_f64::<LittleEndian>()?;
            if !(start <= end) {
                return Err(invalid(name, format!(
                    "feature {feature} has a bin ({start}, {end}]"
                )));
            }
            bins.push(DiscretizationBin::new(start, end));
        }
        let bins = Bins::new(bins)
            .map_err(|e| invalid(name, format!("feature {feature}: {e}")))?;
        all.push(bins);
    }
    Discretization::new(all)
}


fn write_hypothesis<W: Write>(out: &mut W, h: &HypothesisData) -> Result<()> {
    let pivot = match h.pivot() {
        Some(p) => i32::try_from(p).map_err(|_| {
            let message = format!("pivot {p} does not fit in the model format");
            io::Error::new(io::ErrorKind::InvalidInput, message)
        })?,
        None => ABSENT_PIVOT,
    };
    out.write_i32::<LittleEndian>(pivot)?;
    out.write_f64::<LittleEndian>(h.c0())?;
    out.write_u32::<LittleEndian>(to_u32(h.c1().len())?)?;
    for &vote in h.c1() {
        out.write_f64::<LittleEndian>(vote)?;
    }
    Ok(())
}


fn read_hypothesis<R: Read>(
    input: &mut R,
    name: &str,
    n_features: usize,
    max_bins: usize,
) -> Result<HypothesisData>
{
    let pivot = input.read_i32::<LittleEndian>()?;
    let pivot = match pivot {
        ABSENT_PIVOT => None,
        p if p >= 0 && (p as usize) < n_features => Some(p as usize),
        p => return Err(invalid(name, format!("pivot {p} is out of range"))),
    };
    let c0 = input.read_f64::<LittleEndian>()?;
    let n_votes = input.read_u32::<LittleEndian>()? as usize;
    if n_votes > max_bins {
        return Err(invalid(name, format!(
            "{n_votes} votes for at most {max_bins} bins"
        )));
    }
    let mut c1 = Vec::with_capacity(n_votes);
    for _ in 0..n_votes {
        c1.push(input.read_f64::<LittleEndian>()?);
    }
    let mut h = HypothesisData::new(pivot, c0, c1);
    h.pad_votes(max_bins);
    Ok(h)
}


/// Read the hypotheses of one category.
/// An empty or truncated stream ends the sequence early.
fn read_category<R: Read>(
    input: &mut R,
    name: &str,
    n_features: usize,
    max_bins: usize,
) -> Result<Vec<HypothesisData>>
{
    let declared = match input.read_u32::<LittleEndian>() {
        Ok(n) => n as usize,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => 0,
        Err(e) => return Err(e.into()),
    };

    let mut hypotheses = Vec::new();
    for _ in 0..declared {
        match read_hypothesis(input, name, n_features, max_bins) {
            Ok(h) => hypotheses.push(h),
            Err(TextBoostError::Io(e))
                if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
    }
    Ok(hypotheses)
}
