use std::ffi::CString;

use super::*;

/// Parameters for [`super::Command::LoadModule`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LoadModuleParams {
    /// The name of the module to load.
    pub name: CString,

    /// The arguments to pass to the module.
    pub arguments: Option<CString>,
}

impl TagStructRead for LoadModuleParams {
    fn read(ts: &mut TagStructReader<'_>, _protocol_version: u16) -> Result<Self, ProtocolError> {
        Ok(Self {
            name: ts
                .read_string()?
                .ok_or_else(|| ProtocolError::Invalid("invalid module name".into()))?,
            arguments: ts.read_string()?,
        })
    }
}

impl TagStructWrite for LoadModuleParams {
    fn write(
        &self,
        ts: &mut TagStructWriter<'_>,
        _protocol_version: u16,
    ) -> Result<(), ProtocolError> {
        ts.write_string(Some(&self.name))?;
        ts.write_string(self.arguments.as_ref())?;
        Ok(())
    }
}

/// The server response to [`super::Command::LoadModule`]: the index of the newly loaded module.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LoadModuleReply(pub u32);

impl CommandReply for LoadModuleReply {}

impl TagStructRead for LoadModuleReply {
    fn read(ts: &mut TagStructReader<'_>, _protocol_version: u16) -> Result<Self, ProtocolError> {
        Ok(Self(ts.read_u32()?))
    }
}

impl TagStructWrite for LoadModuleReply {
    fn write(
        &self,
        ts: &mut TagStructWriter<'_>,
        _protocol_version: u16,
    ) -> Result<(), ProtocolError> {
        ts.write_u32(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::test_util::test_serde;

    #[test]
    fn test_load_module_params_serde() -> anyhow::Result<()> {
        let params = LoadModuleParams {
            name: CString::new("name").unwrap(),
            arguments: Some(CString::new("args").unwrap()),
        };

        test_serde(&params)
    }

    #[test]
    fn test_load_module_reply_serde() -> anyhow::Result<()> {
        test_serde(&LoadModuleReply(5))
    }
}
