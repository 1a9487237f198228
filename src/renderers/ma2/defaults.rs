//! Fixed values of the grandMA2 XML import format
//!
//! None of these are derived from anything: the console expects them
//! byte-for-byte, including the misspelled `lenght` attribute.

/// Schema-instance namespace, bound to the `xsi` prefix on the root
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Default namespace of every element
pub const MA_NAMESPACE: &str = "http://schemas.malighting.de/grandma2/xml/MA";

/// Value of `xsi:schemaLocation` on the root
pub const MA_SCHEMA_LOCATION: &str =
    "http://schemas.malighting.de/grandma2/xml/MA http://schemas.malighting.de/grandma2/xml/3.9.0/MA.xsd";

/// Schema version attributes on `<MA>`
pub const MAJOR_VERS: &str = "3";
pub const MINOR_VERS: &str = "0";
pub const STREAM_VERS: &str = "0";

/// Element names
pub mod element {
    pub const MA: &str = "MA";
    pub const TIMECODE: &str = "Timecode";
    pub const TRACK: &str = "Track";
    pub const OBJECT: &str = "Object";
    pub const NO: &str = "No";
    pub const SUB_TRACK: &str = "SubTrack";
    pub const EVENT: &str = "Event";
    pub const CUE: &str = "Cue";
    pub const MACRO: &str = "Macro";
    pub const MACROLINE: &str = "Macroline";
    pub const TEXT: &str = "text";
}

/// Pool index the timecode show and macro are written at inside their file
pub const FILE_POOL_INDEX: u32 = 1;

/// `slot` of the timecode show
pub const TIMECODE_SLOT: &str = "Link Selected";

/// Timecode events fire the executor's Go
pub const EVENT_COMMAND: &str = "Go";

/// Object type code of an executor in a track's `<Object>` reference
pub const EXECUTOR_OBJECT_TYPE: u32 = 30;

/// Second `<No>` of an executor reference (executor pool, always 1)
pub const EXECUTOR_POOL: u32 = 1;

/// Object type code of a sequence in a cue reference
pub const SEQUENCE_OBJECT_TYPE: u32 = 1;

/// Prefix of the generated macro's name
pub const MACRO_NAME_PREFIX: &str = "Setup TC";

/// Command that selects destination 1 before importing
pub const SELECT_DESTINATION: &str = "sd 1";
