//! In-memory planetary kernel.
//!
//! Loading walks the DAF structure of an SPK file:
//! 1. the file record ([`DAFHeader`]) gives the summary layout and the first summary record;
//! 2. the comment area, when it names an ephemeris version, gives the [`JPLEphemHeader`];
//! 3. the doubly linked summary records list every segment ([`Summary`]);
//! 4. each type 2 segment is decoded into its [`DirectoryData`] footer and its
//!    Chebyshev [`EphemerisRecord`]s.
//!
//! Segments are indexed by target. States relative to the solar system barycenter are
//! obtained by chaining segments from a target to its center until the barycenter is
//! reached, e.g. Moon → Earth-Moon barycenter → SSB.
//!
//! Times are ET seconds past J2000, positions km, velocities km/s.
use std::{collections::HashMap, fmt, fs};

use camino::Utf8Path;
use itertools::Itertools;
use nom::{error::Error as NomError, number::complete::le_f64};
use tracing::debug;

use crate::{
    almanac_errors::AlmanacError,
    jpl_ephem::state_vector::StateVector,
};

use super::{
    daf_header::{DAFHeader, DAF_RECORD_LEN},
    directory::{DirectoryData, DIRECTORY_WORDS},
    ephemeris_record::EphemerisRecord,
    jpl_ephem_header::JPLEphemHeader,
    naif_ids::{naif_type::SpkDataType, NaifIds},
    summary_record::Summary,
};

/// NAIF id of the solar system barycenter, where segment chains end.
const SSB_ID: i32 = 0;

/// Longest admissible target → center chain (a planet mass center is two hops away).
const MAX_CHAIN_LENGTH: usize = 8;

fn nom_error<E: fmt::Debug>(context: &str, err: nom::Err<E>) -> AlmanacError {
    AlmanacError::NomParsingError(format!("{context}: {err:?}"))
}

fn byte_range<'a>(
    bytes: &'a [u8],
    start: usize,
    end: usize,
    what: &str,
) -> Result<&'a [u8], AlmanacError> {
    bytes.get(start..end).ok_or_else(|| {
        AlmanacError::NomParsingError(format!(
            "{what} spans bytes {start}..{end} but the file has {} bytes",
            bytes.len()
        ))
    })
}

/// One type 2 SPK segment: a target's position relative to a center over a time span.
#[derive(Debug, Clone)]
pub struct Segment {
    pub summary: Summary,
    pub directory: DirectoryData,
    pub records: Vec<EphemerisRecord>,
}

impl Segment {
    fn read(bytes: &[u8], summary: Summary) -> Result<Self, AlmanacError> {
        if SpkDataType::from_i32(summary.data_type)? != SpkDataType::ChebyshevPositionOnly {
            return Err(AlmanacError::InvalidSpkDataType(summary.data_type));
        }
        if summary.initial_addr < 1 || summary.final_addr < summary.initial_addr {
            return Err(AlmanacError::NomParsingError(format!(
                "invalid segment addresses {}..{}",
                summary.initial_addr, summary.final_addr
            )));
        }

        let start = (summary.initial_addr as usize - 1) * 8;
        let end = summary.final_addr as usize * 8;
        let data = byte_range(bytes, start, end, "segment")?;

        let footer_start = data
            .len()
            .checked_sub(DIRECTORY_WORDS * 8)
            .ok_or_else(|| AlmanacError::NomParsingError("segment shorter than its directory".into()))?;
        let (_, directory) =
            DirectoryData::parse(&data[footer_start..]).map_err(|e| nom_error("segment directory", e))?;

        let record_bytes = directory.rsize * 8;
        let n_coeff = directory.n_coefficients();
        if n_coeff == 0 || directory.intlen <= 0.0 || directory.n_records * record_bytes > footer_start {
            return Err(AlmanacError::NomParsingError(format!(
                "inconsistent directory for target {}: {directory:?}",
                summary.target
            )));
        }

        let records = data[..directory.n_records * record_bytes]
            .chunks_exact(record_bytes)
            .map(|chunk| {
                EphemerisRecord::parse(chunk, n_coeff)
                    .map(|(_, record)| record)
                    .map_err(|e| nom_error("ephemeris record", e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Segment {
            summary,
            directory,
            records,
        })
    }

    /// State of the segment target relative to its center at `et_seconds`.
    pub fn state(&self, et_seconds: f64) -> Result<StateVector, AlmanacError> {
        let out_of_range = || AlmanacError::EpochOutOfRange {
            target: self.summary.target,
            et_seconds,
        };
        if !self.summary.covers(et_seconds) {
            return Err(out_of_range());
        }
        self.records
            .get(self.directory.record_index(et_seconds))
            .map(|record| record.interpolate(et_seconds))
            .ok_or_else(out_of_range)
    }
}

#[derive(Debug, Clone)]
pub struct NaifData {
    pub(crate) daf_header: DAFHeader,
    pub(crate) header: Option<JPLEphemHeader>,
    segments: HashMap<i32, Vec<Segment>>,
}

impl NaifData {
    /// Load a planetary kernel from disk.
    pub fn read_naif_file(path: &Utf8Path) -> Result<Self, AlmanacError> {
        let bytes = fs::read(path)?;
        let data = NaifData::from_bytes(&bytes)?;
        debug!(
            %path,
            version = data.version().unwrap_or("unknown"),
            segments = data.segments.values().map(Vec::len).sum::<usize>(),
            "ephemeris file loaded"
        );
        Ok(data)
    }

    /// Decode a complete DAF/SPK image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AlmanacError> {
        let file_record = byte_range(bytes, 0, DAF_RECORD_LEN, "file record")?;
        let (_, daf_header) = DAFHeader::parse(file_record).map_err(|e| nom_error("DAF header", e))?;

        if !daf_header.idword.starts_with("DAF/SPK") {
            return Err(AlmanacError::NomParsingError(format!(
                "not an SPK file (id word {:?})",
                daf_header.idword
            )));
        }
        if daf_header.locfmt != "LTL-IEEE" {
            return Err(AlmanacError::NomParsingError(format!(
                "unsupported binary format {:?}, only LTL-IEEE kernels are read",
                daf_header.locfmt
            )));
        }
        if daf_header.nd != 2 || daf_header.ni != 6 || daf_header.fward < 2 {
            return Err(AlmanacError::NomParsingError(format!(
                "unexpected SPK layout: ND={}, NI={}, FWARD={}",
                daf_header.nd, daf_header.ni, daf_header.fward
            )));
        }

        let comment_end = ((daf_header.fward as usize - 1) * DAF_RECORD_LEN).min(bytes.len());
        let comment = String::from_utf8_lossy(&bytes[DAF_RECORD_LEN.min(comment_end)..comment_end])
            .replace(['\0', '\u{4}'], "\n");
        let header = JPLEphemHeader::parse(&comment);

        let mut segments: HashMap<i32, Vec<Segment>> = HashMap::new();
        for summary in Self::summaries(bytes, &daf_header)? {
            let segment = Segment::read(bytes, summary)?;
            segments
                .entry(segment.summary.target)
                .or_default()
                .push(segment);
        }

        Ok(NaifData {
            daf_header,
            header,
            segments,
        })
    }

    /// Walk the summary record list starting at FWARD.
    fn summaries(bytes: &[u8], daf_header: &DAFHeader) -> Result<Vec<Summary>, AlmanacError> {
        let summary_len = daf_header.summary_size() * 8;
        let mut summaries = Vec::new();
        let mut visited = Vec::new();
        let mut record_number = daf_header.fward as usize;

        while record_number != 0 {
            if visited.contains(&record_number) {
                return Err(AlmanacError::NomParsingError(format!(
                    "summary record {record_number} visited twice"
                )));
            }
            visited.push(record_number);

            let start = (record_number - 1) * DAF_RECORD_LEN;
            let record = byte_range(bytes, start, start + DAF_RECORD_LEN, "summary record")?;

            let (input, next) = le_f64::<_, NomError<&[u8]>>(record)
                .map_err(|e| nom_error("summary control", e))?;
            let (input, _prev) = le_f64::<_, NomError<&[u8]>>(input)
                .map_err(|e| nom_error("summary control", e))?;
            let (_, n_summaries) = le_f64::<_, NomError<&[u8]>>(input)
                .map_err(|e| nom_error("summary control", e))?;

            for i in 0..n_summaries as usize {
                let offset = 24 + i * summary_len;
                let raw = byte_range(record, offset, offset + summary_len, "summary")?;
                let (_, summary) = Summary::parse(raw).map_err(|e| nom_error("summary", e))?;
                summaries.push(summary);
            }

            record_number = next as usize;
        }
        Ok(summaries)
    }

    /// Ephemeris label found in the comment area, e.g. `"DE421"`.
    pub fn version(&self) -> Option<&str> {
        self.header.as_ref().map(|h| h.version.as_str())
    }

    pub fn has_target(&self, target: NaifIds) -> bool {
        self.segments.contains_key(&target.to_id())
    }

    fn segment(&self, target: i32, et_seconds: f64) -> Result<&Segment, AlmanacError> {
        self.segments
            .get(&target)
            .ok_or(AlmanacError::SegmentNotFound(target))?
            .iter()
            .find(|segment| segment.summary.covers(et_seconds))
            .ok_or(AlmanacError::EpochOutOfRange { target, et_seconds })
    }

    /// State of `target` relative to the solar system barycenter.
    pub fn ssb_state(&self, target: NaifIds, et_seconds: f64) -> Result<StateVector, AlmanacError> {
        let mut state = StateVector::zeros();
        let mut id = target.to_id();

        for _ in 0..MAX_CHAIN_LENGTH {
            if id == SSB_ID {
                return Ok(state);
            }
            let segment = self.segment(id, et_seconds)?;
            state += segment.state(et_seconds)?;
            id = segment.summary.center;
        }
        Err(AlmanacError::SegmentNotFound(target.to_id()))
    }

    /// State of `target` relative to `center`.
    pub fn ephemeris(
        &self,
        target: NaifIds,
        center: NaifIds,
        et_seconds: f64,
    ) -> Result<StateVector, AlmanacError> {
        Ok(self.ssb_state(target, et_seconds)? - self.ssb_state(center, et_seconds)?)
    }

    /// Print the headers and the segment table on stdout.
    pub fn info(&self) {
        println!("+{:-^78}+", " Ephemeris File Information ");
        println!("{}", self.daf_header);
        if let Some(header) = &self.header {
            println!("{header}");
        }
        println!("+{:-^78}+", " Available Segments ");

        for segment in self
            .segments
            .values()
            .flatten()
            .sorted_by_key(|s| (s.summary.target, s.summary.center))
        {
            println!("{}", segment.summary);
            println!("{}", segment.directory);
        }
    }
}
