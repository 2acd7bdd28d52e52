//! Commands are the top-level IPC structure used in the protocol.

use std::io::{BufRead, Write};

mod auth;
mod load_module;
mod playback_stream;
mod record_stream;
mod sample;
mod server_info;
mod set_client_name;
mod sink_info;
mod source_info;
mod stream_events;
mod subscribe;
mod upload_stream;
mod volume;

pub use auth::{AuthParams, AuthReply};
pub use load_module::*;
pub use playback_stream::*;
pub use record_stream::*;
pub use sample::*;
pub use server_info::*;
pub use set_client_name::*;
pub use sink_info::*;
pub use source_info::*;
pub use stream_events::*;
pub use subscribe::*;
pub use upload_stream::*;
pub use volume::*;

use super::{serde::*, ProtocolError, PulseError};

use enum_primitive_derive::Primitive;
use num_traits::FromPrimitive as _;

#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Primitive)]
pub enum CommandTag {
    /* Generic commands */
    Error = 0,
    Timeout = 1, /* pseudo command */
    Reply = 2,   /* actually used for command replies */

    /* CLIENT->SERVER */
    CreatePlaybackStream = 3, /* Payload changed in v9, v12 (0.9.0, 0.9.8) */
    DeletePlaybackStream = 4,
    CreateRecordStream = 5, /* Payload changed in v9, v12 (0.9.0, 0.9.8) */
    DeleteRecordStream = 6,
    Exit = 7,
    Auth = 8,
    SetClientName = 9,
    LookupSink = 10,
    LookupSource = 11,
    DrainPlaybackStream = 12,
    Stat = 13,
    GetPlaybackLatency = 14,
    CreateUploadStream = 15,
    DeleteUploadStream = 16,
    FinishUploadStream = 17,
    PlaySample = 18,
    RemoveSample = 19,

    GetServerInfo = 20,
    GetSinkInfo = 21,
    GetSinkInfoList = 22,
    GetSourceInfo = 23,
    GetSourceInfoList = 24,
    GetModuleInfo = 25,
    GetModuleInfoList = 26,
    GetClientInfo = 27,
    GetClientInfoList = 28,
    GetSinkInputInfo = 29,     /* Payload changed in v11 (0.9.7) */
    GetSinkInputInfoList = 30, /* Payload changed in v11 (0.9.7) */
    GetSourceOutputInfo = 31,
    GetSourceOutputInfoList = 32,
    GetSampleInfo = 33,
    GetSampleInfoList = 34,
    Subscribe = 35,

    SetSinkVolume = 36,
    SetSinkInputVolume = 37,
    SetSourceVolume = 38,

    SetSinkMute = 39,
    SetSourceMute = 40,

    CorkPlaybackStream = 41,
    FlushPlaybackStream = 42,
    TriggerPlaybackStream = 43,

    SetDefaultSink = 44,
    SetDefaultSource = 45,

    SetPlaybackStreamName = 46,
    SetRecordStreamName = 47,

    KillClient = 48,
    KillSinkInput = 49,
    KillSourceOutput = 50,

    LoadModule = 51,
    UnloadModule = 52,

    /* Obsolete */
    AddAutoloadObsolete = 53,
    RemoveAutoloadObsolete = 54,
    GetAutoloadInfoObsolete = 55,
    GetAutoloadInfoListObsolete = 56,

    GetRecordLatency = 57,
    CorkRecordStream = 58,
    FlushRecordStream = 59,
    PrebufPlaybackStream = 60,

    /* SERVER->CLIENT */
    Request = 61,
    Overflow = 62,
    Underflow = 63,
    PlaybackStreamKilled = 64,
    RecordStreamKilled = 65,
    SubscribeEvent = 66,

    /* A few more client->server commands */

    /* Supported since protocol v10 (0.9.5) */
    MoveSinkInput = 67,
    MoveSourceOutput = 68,

    /* Supported since protocol v11 (0.9.7) */
    SetSinkInputMute = 69,

    SuspendSink = 70,
    SuspendSource = 71,

    /* Supported since protocol v12 (0.9.8) */
    SetPlaybackStreamBufferAttr = 72,
    SetRecordStreamBufferAttr = 73,

    UpdatePlaybackStreamSampleRate = 74,
    UpdateRecordStreamSampleRate = 75,

    /* SERVER->CLIENT */
    PlaybackStreamSuspended = 76,
    RecordStreamSuspended = 77,
    PlaybackStreamMoved = 78,
    RecordStreamMoved = 79,

    /* Supported since protocol v13 (0.9.11) */
    UpdateRecordStreamProplist = 80,
    UpdatePlaybackStreamProplist = 81,
    UpdateClientProplist = 82,
    RemoveRecordStreamProplist = 83,
    RemovePlaybackStreamProplist = 84,
    RemoveClientProplist = 85,

    /* SERVER->CLIENT */
    Started = 86,

    /* Supported since protocol v14 (0.9.12) */
    Extension = 87,

    /* Supported since protocol v15 (0.9.15) */
    GetCardInfo = 88,
    GetCardInfoList = 89,
    SetCardProfile = 90,

    ClientEvent = 91,
    PlaybackStreamEvent = 92,
    RecordStreamEvent = 93,

    /* SERVER->CLIENT */
    PlaybackBufferAttrChanged = 94,
    RecordBufferAttrChanged = 95,

    /* Supported since protocol v16 (0.9.16) */
    SetSinkPort = 96,
    SetSourcePort = 97,

    /* Supported since protocol v22 (1.0) */
    SetSourceOutputVolume = 98,
    SetSourceOutputMute = 99,

    /* Supported since protocol v27 (3.0) */
    SetPortLatencyOffset = 100,

    /* Supported since protocol v30 (6.0) */
    /* BOTH DIRECTIONS */
    EnableSrbchannel = 101,
    DisableSrbchannel = 102,

    /* Supported since protocol v31 (9.0)
     * BOTH DIRECTIONS */
    RegisterMemfdShmid = 103,
}

impl TagStructRead for CommandTag {
    fn read(r: &mut TagStructReader, _protocol_version: u16) -> Result<Self, ProtocolError> {
        let v = r.read_u32()?;

        CommandTag::from_u32(v)
            .ok_or_else(|| ProtocolError::Invalid(format!("invalid command tag: {}", v)))
    }
}

impl TagStructWrite for CommandTag {
    fn write(&self, w: &mut TagStructWriter, _protocol_version: u16) -> Result<(), ProtocolError> {
        w.write_u32(*self as u32)?;

        Ok(())
    }
}

// A marker trait for reply data.
pub trait CommandReply: TagStructRead + TagStructWrite {}

#[derive(Debug)]
pub enum Command {
    /// A reply to some other command. If this is returned by read_tag_prefixed, the payload has yet to be read.
    Reply,

    /// An error reply, carrying the server's error code. `seq` correlates it with the request
    /// that caused it.
    Error(PulseError),

    /// Authentication request (and protocol handshake).
    Auth(AuthParams),

    /// Updates client properties (not just the name).
    SetClientName(Props),

    /// Create and delete streams.
    CreatePlaybackStream(PlaybackStreamParams),
    DeletePlaybackStream(u32),
    CreateRecordStream(RecordStreamParams),
    DeleteRecordStream(u32),
    CreateUploadStream(UploadStreamParams),
    DeleteUploadStream(u32),
    FinishUploadStream(u32),
    DrainPlaybackStream(u32),

    CorkPlaybackStream(CorkStreamParams),
    CorkRecordStream(CorkStreamParams),
    FlushPlaybackStream(u32),
    FlushRecordStream(u32),
    SetPlaybackStreamName(SetStreamNameParams),
    SetRecordStreamName(SetStreamNameParams),

    LoadModule(LoadModuleParams),
    PlaySample(PlaySampleParams),

    SetSinkVolume(SetDeviceVolumeParams),
    SetSourceVolume(SetDeviceVolumeParams),
    SetSinkInputVolume(SetStreamVolumeParams),
    SetSourceOutputVolume(SetStreamVolumeParams),
    SetSinkMute(SetDeviceMuteParams),
    SetSourceMute(SetDeviceMuteParams),
    SetSinkInputMute(SetStreamMuteParams),
    SetSourceOutputMute(SetStreamMuteParams),

    /// So-called introspection commands, to read back the state of the server.
    GetServerInfo,
    GetSinkInfo(GetSinkInfo),
    GetSinkInfoList,
    GetSourceInfo(GetSourceInfo),
    GetSourceInfoList,
    Subscribe(SubscriptionMask),

    Request(Request),
    Overflow(u32),
    Underflow(Underflow),
    PlaybackStreamKilled(u32),
    RecordStreamKilled(u32),
    Started(u32),
    PlaybackBufferAttrChanged(PlaybackBufferAttrChanged),
    RecordBufferAttrChanged(RecordBufferAttrChanged),
    PlaybackStreamMoved(PlaybackStreamMovedParams),
    RecordStreamMoved(RecordStreamMovedParams),
    PlaybackStreamSuspended(StreamSuspendedParams),
    RecordStreamSuspended(StreamSuspendedParams),
    ClientEvent(GenericStreamEvent),
    PlaybackStreamEvent(GenericStreamEvent),
    RecordStreamEvent(GenericStreamEvent),
    SubscribeEvent(SubscriptionEvent),
}

impl Command {
    pub fn read_tag_prefixed<R: BufRead>(
        r: &mut R,
        protocol_version: u16,
    ) -> Result<(u32, Self), ProtocolError> {
        let mut ts = TagStructReader::new(r, protocol_version);
        let (command, seq) = (ts.read_enum()?, ts.read_u32()?);

        let cmd = match command {
            CommandTag::Error => Ok(Command::Error(ts.read_enum()?)),
            CommandTag::Timeout => Err(ProtocolError::Timeout),
            CommandTag::Reply => Ok(Command::Reply),

            CommandTag::Exit => Err(ProtocolError::Unimplemented(command)),
            CommandTag::Auth => Ok(Command::Auth(ts.read()?)),
            CommandTag::SetClientName => Ok(Command::SetClientName(ts.read()?)),

            CommandTag::CreatePlaybackStream => Ok(Command::CreatePlaybackStream(ts.read()?)),
            CommandTag::DeletePlaybackStream => Ok(Command::DeletePlaybackStream(ts.read_u32()?)),
            CommandTag::CreateRecordStream => Ok(Command::CreateRecordStream(ts.read()?)),
            CommandTag::DeleteRecordStream => Ok(Command::DeleteRecordStream(ts.read_u32()?)),
            CommandTag::LookupSink => Err(ProtocolError::Unimplemented(command)),
            CommandTag::LookupSource => Err(ProtocolError::Unimplemented(command)),
            CommandTag::DrainPlaybackStream => Ok(Command::DrainPlaybackStream(ts.read_u32()?)),
            CommandTag::Stat => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetPlaybackLatency => Err(ProtocolError::Unimplemented(command)),
            CommandTag::CreateUploadStream => Ok(Command::CreateUploadStream(ts.read()?)),
            CommandTag::DeleteUploadStream => Ok(Command::DeleteUploadStream(ts.read_u32()?)),
            CommandTag::FinishUploadStream => Ok(Command::FinishUploadStream(ts.read_u32()?)),
            CommandTag::PlaySample => Ok(Command::PlaySample(ts.read()?)),
            CommandTag::RemoveSample => Err(ProtocolError::Unimplemented(command)),

            CommandTag::GetServerInfo => Ok(Command::GetServerInfo),
            CommandTag::GetSinkInfo => Ok(Command::GetSinkInfo(ts.read()?)),
            CommandTag::GetSinkInfoList => Ok(Command::GetSinkInfoList),
            CommandTag::GetSourceInfo => Ok(Command::GetSourceInfo(ts.read()?)),
            CommandTag::GetSourceInfoList => Ok(Command::GetSourceInfoList),
            CommandTag::GetModuleInfo => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetModuleInfoList => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetClientInfo => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetClientInfoList => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetSinkInputInfo => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetSinkInputInfoList => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetSourceOutputInfo => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetSourceOutputInfoList => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetSampleInfo => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetSampleInfoList => Err(ProtocolError::Unimplemented(command)),
            CommandTag::Subscribe => Ok(Command::Subscribe(ts.read()?)),
            CommandTag::SubscribeEvent => Ok(Command::SubscribeEvent(ts.read()?)),

            CommandTag::Request => Ok(Command::Request(ts.read()?)),
            CommandTag::Overflow => Ok(Command::Overflow(ts.read_u32()?)),
            CommandTag::Underflow => Ok(Command::Underflow(ts.read()?)),
            CommandTag::PlaybackStreamKilled => Ok(Command::PlaybackStreamKilled(ts.read_u32()?)),
            CommandTag::RecordStreamKilled => Ok(Command::RecordStreamKilled(ts.read_u32()?)),
            CommandTag::Started => Ok(Command::Started(ts.read_u32()?)),
            CommandTag::PlaybackBufferAttrChanged => {
                Ok(Command::PlaybackBufferAttrChanged(ts.read()?))
            }

            CommandTag::SetSinkVolume => Ok(Command::SetSinkVolume(ts.read()?)),
            CommandTag::SetSinkInputVolume => Ok(Command::SetSinkInputVolume(ts.read()?)),
            CommandTag::SetSourceVolume => Ok(Command::SetSourceVolume(ts.read()?)),
            CommandTag::SetSinkMute => Ok(Command::SetSinkMute(ts.read()?)),
            CommandTag::SetSourceMute => Ok(Command::SetSourceMute(ts.read()?)),
            CommandTag::CorkPlaybackStream => Ok(Command::CorkPlaybackStream(ts.read()?)),
            CommandTag::FlushPlaybackStream => {
                Ok(Command::FlushPlaybackStream(ts.read_u32()?))
            }
            CommandTag::TriggerPlaybackStream => Err(ProtocolError::Unimplemented(command)),
            CommandTag::SetDefaultSink => Err(ProtocolError::Unimplemented(command)),
            CommandTag::SetDefaultSource => Err(ProtocolError::Unimplemented(command)),
            CommandTag::SetPlaybackStreamName => {
                Ok(Command::SetPlaybackStreamName(ts.read()?))
            }
            CommandTag::SetRecordStreamName => Ok(Command::SetRecordStreamName(ts.read()?)),
            CommandTag::KillClient => Err(ProtocolError::Unimplemented(command)),
            CommandTag::KillSinkInput => Err(ProtocolError::Unimplemented(command)),
            CommandTag::KillSourceOutput => Err(ProtocolError::Unimplemented(command)),
            CommandTag::LoadModule => Ok(Command::LoadModule(ts.read()?)),
            CommandTag::UnloadModule => Err(ProtocolError::Unimplemented(command)),
            CommandTag::AddAutoloadObsolete => Err(ProtocolError::Unimplemented(command)),
            CommandTag::RemoveAutoloadObsolete => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetAutoloadInfoObsolete => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetAutoloadInfoListObsolete => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetRecordLatency => Err(ProtocolError::Unimplemented(command)),
            CommandTag::CorkRecordStream => Ok(Command::CorkRecordStream(ts.read()?)),
            CommandTag::FlushRecordStream => Ok(Command::FlushRecordStream(ts.read_u32()?)),
            CommandTag::PrebufPlaybackStream => Err(ProtocolError::Unimplemented(command)),
            CommandTag::MoveSinkInput => Err(ProtocolError::Unimplemented(command)),
            CommandTag::MoveSourceOutput => Err(ProtocolError::Unimplemented(command)),
            CommandTag::SetSinkInputMute => Ok(Command::SetSinkInputMute(ts.read()?)),
            CommandTag::SuspendSink => Err(ProtocolError::Unimplemented(command)),
            CommandTag::SuspendSource => Err(ProtocolError::Unimplemented(command)),
            CommandTag::SetPlaybackStreamBufferAttr => Err(ProtocolError::Unimplemented(command)),
            CommandTag::SetRecordStreamBufferAttr => Err(ProtocolError::Unimplemented(command)),
            CommandTag::UpdatePlaybackStreamSampleRate => {
                Err(ProtocolError::Unimplemented(command))
            }
            CommandTag::UpdateRecordStreamSampleRate => Err(ProtocolError::Unimplemented(command)),
            CommandTag::PlaybackStreamSuspended => {
                Ok(Command::PlaybackStreamSuspended(ts.read()?))
            }
            CommandTag::RecordStreamSuspended => Ok(Command::RecordStreamSuspended(ts.read()?)),
            CommandTag::PlaybackStreamMoved => Ok(Command::PlaybackStreamMoved(ts.read()?)),
            CommandTag::RecordStreamMoved => Ok(Command::RecordStreamMoved(ts.read()?)),
            CommandTag::UpdateRecordStreamProplist => Err(ProtocolError::Unimplemented(command)),
            CommandTag::UpdatePlaybackStreamProplist => Err(ProtocolError::Unimplemented(command)),
            CommandTag::UpdateClientProplist => Err(ProtocolError::Unimplemented(command)),
            CommandTag::RemoveRecordStreamProplist => Err(ProtocolError::Unimplemented(command)),
            CommandTag::RemovePlaybackStreamProplist => Err(ProtocolError::Unimplemented(command)),
            CommandTag::RemoveClientProplist => Err(ProtocolError::Unimplemented(command)),
            CommandTag::Extension => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetCardInfo => Err(ProtocolError::Unimplemented(command)),
            CommandTag::GetCardInfoList => Err(ProtocolError::Unimplemented(command)),
            CommandTag::SetCardProfile => Err(ProtocolError::Unimplemented(command)),
            CommandTag::ClientEvent => Ok(Command::ClientEvent(ts.read()?)),
            CommandTag::PlaybackStreamEvent => Ok(Command::PlaybackStreamEvent(ts.read()?)),
            CommandTag::RecordStreamEvent => Ok(Command::RecordStreamEvent(ts.read()?)),

            CommandTag::RecordBufferAttrChanged => {
                Ok(Command::RecordBufferAttrChanged(ts.read()?))
            }

            CommandTag::SetSinkPort => Err(ProtocolError::Unimplemented(command)),
            CommandTag::SetSourcePort => Err(ProtocolError::Unimplemented(command)),
            CommandTag::SetSourceOutputVolume => Ok(Command::SetSourceOutputVolume(ts.read()?)),
            CommandTag::SetSourceOutputMute => Ok(Command::SetSourceOutputMute(ts.read()?)),
            CommandTag::SetPortLatencyOffset => Err(ProtocolError::Unimplemented(command)),
            CommandTag::EnableSrbchannel => Err(ProtocolError::Unimplemented(command)),
            CommandTag::DisableSrbchannel => Err(ProtocolError::Unimplemented(command)),
            CommandTag::RegisterMemfdShmid => Err(ProtocolError::Unimplemented(command)),
        }?;

        Ok((seq, cmd))
    }

    pub fn write_tag_prefixed<W: Write>(
        &self,
        seq: u32,
        w: &mut W,
        protocol_version: u16,
    ) -> Result<(), ProtocolError> {
        let mut ts = TagStructWriter::new(w, protocol_version);

        ts.write_u32(self.tag() as u32)?;
        ts.write_u32(seq)?;
        ts.write(self)?;

        Ok(())
    }

    pub fn tag(&self) -> CommandTag {
        match self {
            Command::Reply => CommandTag::Reply,
            Command::Error(_) => CommandTag::Error,

            Command::Auth(_) => CommandTag::Auth,
            Command::SetClientName(_) => CommandTag::SetClientName,
            Command::CreatePlaybackStream(_) => CommandTag::CreatePlaybackStream,
            Command::DeletePlaybackStream(_) => CommandTag::DeletePlaybackStream,
            Command::CreateRecordStream(_) => CommandTag::CreateRecordStream,
            Command::DeleteRecordStream(_) => CommandTag::DeleteRecordStream,
            Command::CreateUploadStream(_) => CommandTag::CreateUploadStream,
            Command::DeleteUploadStream(_) => CommandTag::DeleteUploadStream,
            Command::FinishUploadStream(_) => CommandTag::FinishUploadStream,
            Command::DrainPlaybackStream(_) => CommandTag::DrainPlaybackStream,

            Command::CorkPlaybackStream(_) => CommandTag::CorkPlaybackStream,
            Command::CorkRecordStream(_) => CommandTag::CorkRecordStream,
            Command::FlushPlaybackStream(_) => CommandTag::FlushPlaybackStream,
            Command::FlushRecordStream(_) => CommandTag::FlushRecordStream,
            Command::SetPlaybackStreamName(_) => CommandTag::SetPlaybackStreamName,
            Command::SetRecordStreamName(_) => CommandTag::SetRecordStreamName,

            Command::LoadModule(_) => CommandTag::LoadModule,
            Command::PlaySample(_) => CommandTag::PlaySample,

            Command::SetSinkVolume(_) => CommandTag::SetSinkVolume,
            Command::SetSourceVolume(_) => CommandTag::SetSourceVolume,
            Command::SetSinkInputVolume(_) => CommandTag::SetSinkInputVolume,
            Command::SetSourceOutputVolume(_) => CommandTag::SetSourceOutputVolume,
            Command::SetSinkMute(_) => CommandTag::SetSinkMute,
            Command::SetSourceMute(_) => CommandTag::SetSourceMute,
            Command::SetSinkInputMute(_) => CommandTag::SetSinkInputMute,
            Command::SetSourceOutputMute(_) => CommandTag::SetSourceOutputMute,

            Command::GetServerInfo => CommandTag::GetServerInfo,
            Command::GetSinkInfo(_) => CommandTag::GetSinkInfo,
            Command::GetSinkInfoList => CommandTag::GetSinkInfoList,
            Command::GetSourceInfo(_) => CommandTag::GetSourceInfo,
            Command::GetSourceInfoList => CommandTag::GetSourceInfoList,
            Command::Subscribe(_) => CommandTag::Subscribe,
            Command::SubscribeEvent(_) => CommandTag::SubscribeEvent,
            Command::Request(_) => CommandTag::Request,
            Command::Overflow(_) => CommandTag::Overflow,
            Command::Underflow(_) => CommandTag::Underflow,
            Command::PlaybackStreamKilled(_) => CommandTag::PlaybackStreamKilled,
            Command::RecordStreamKilled(_) => CommandTag::RecordStreamKilled,
            Command::Started(_) => CommandTag::Started,
            Command::PlaybackBufferAttrChanged(_) => CommandTag::PlaybackBufferAttrChanged,
            Command::RecordBufferAttrChanged(_) => CommandTag::RecordBufferAttrChanged,
            Command::PlaybackStreamMoved(_) => CommandTag::PlaybackStreamMoved,
            Command::RecordStreamMoved(_) => CommandTag::RecordStreamMoved,
            Command::PlaybackStreamSuspended(_) => CommandTag::PlaybackStreamSuspended,
            Command::RecordStreamSuspended(_) => CommandTag::RecordStreamSuspended,
            Command::ClientEvent(_) => CommandTag::ClientEvent,
            Command::PlaybackStreamEvent(_) => CommandTag::PlaybackStreamEvent,
            Command::RecordStreamEvent(_) => CommandTag::RecordStreamEvent,
        }
    }
}

impl TagStructWrite for Command {
    fn write(
        &self,
        w: &mut crate::protocol::serde::TagStructWriter,
        _protocol_version: u16,
    ) -> Result<(), crate::protocol::ProtocolError> {
        match self {
            Command::Reply => Ok(()),
            Command::Error(code) => w.write_u32(*code as u32),

            Command::Auth(ref p) => w.write(p),
            Command::SetClientName(ref p) => w.write(p),
            Command::CreatePlaybackStream(ref p) => w.write(p),
            Command::DeletePlaybackStream(chan) => w.write_u32(*chan),
            Command::CreateRecordStream(ref p) => w.write(p),
            Command::DeleteRecordStream(chan) => w.write_u32(*chan),
            Command::CreateUploadStream(ref p) => w.write(p),
            Command::DeleteUploadStream(chan) => w.write_u32(*chan),
            Command::FinishUploadStream(chan) => w.write_u32(*chan),
            Command::DrainPlaybackStream(chan) => w.write_u32(*chan),

            Command::CorkPlaybackStream(ref p) => w.write(p),
            Command::CorkRecordStream(ref p) => w.write(p),
            Command::FlushPlaybackStream(chan) => w.write_u32(*chan),
            Command::FlushRecordStream(chan) => w.write_u32(*chan),
            Command::SetPlaybackStreamName(ref p) => w.write(p),
            Command::SetRecordStreamName(ref p) => w.write(p),

            Command::LoadModule(ref p) => w.write(p),
            Command::PlaySample(ref p) => w.write(p),

            Command::SetSinkVolume(ref p) => w.write(p),
            Command::SetSourceVolume(ref p) => w.write(p),
            Command::SetSinkInputVolume(ref p) => w.write(p),
            Command::SetSourceOutputVolume(ref p) => w.write(p),
            Command::SetSinkMute(ref p) => w.write(p),
            Command::SetSourceMute(ref p) => w.write(p),
            Command::SetSinkInputMute(ref p) => w.write(p),
            Command::SetSourceOutputMute(ref p) => w.write(p),

            Command::GetSinkInfo(ref p) => w.write(p),
            Command::GetSourceInfo(ref p) => w.write(p),
            Command::Subscribe(mask) => w.write(mask),
            Command::SubscribeEvent(ref p) => w.write(p),
            Command::Request(ref p) => w.write(p),
            Command::Overflow(chan) => w.write_u32(*chan),
            Command::Underflow(ref p) => w.write(p),
            Command::PlaybackStreamKilled(chan) => w.write_u32(*chan),
            Command::RecordStreamKilled(chan) => w.write_u32(*chan),
            Command::Started(chan) => w.write_u32(*chan),
            Command::PlaybackBufferAttrChanged(ref p) => w.write(p),
            Command::RecordBufferAttrChanged(ref p) => w.write(p),
            Command::PlaybackStreamMoved(ref p) => w.write(p),
            Command::RecordStreamMoved(ref p) => w.write(p),
            Command::PlaybackStreamSuspended(ref p) => w.write(p),
            Command::RecordStreamSuspended(ref p) => w.write(p),
            Command::ClientEvent(ref p) => w.write(p),
            Command::PlaybackStreamEvent(ref p) => w.write(p),
            Command::RecordStreamEvent(ref p) => w.write(p),
            Command::GetServerInfo | Command::GetSinkInfoList | Command::GetSourceInfoList => {
                Ok(())
            }
        }
    }
}
