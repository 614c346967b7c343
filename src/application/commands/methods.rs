//! Method Names - 命令名表

/// 定义方法名枚举及其与线上字符串的双向映射
macro_rules! method_table {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

method_table! {
    /// 全局通道方法
    SdkMethod {
        PlatformVersion => "getPlatformVersion",
        SdkVersion => "getSdkVersion",
        InitSdk => "initSDK",
        DestroySdk => "destroySDK",
        EnableLog => "enableLog",
        EnableP2p => "enableP2P",
        SetAccessToken => "setAccessToken",
        GetAccessToken => "getAccessToken",
        SetServerUrl => "setServerUrl",
        DeviceInfo => "getDeviceInfo",
        DeviceInfoList => "getDeviceInfoList",
        DeviceList => "getDeviceList",
        AddDevice => "addDevice",
        DeleteDevice => "deleteDevice",
        ProbeDeviceInfo => "probeDeviceInfo",
        AreaList => "getAreaList",
        SetVideoLevel => "setVideoLevel",
        ControlPtz => "controlPTZ",
        LoginNetDevice => "loginNetDevice",
        LogoutNetDevice => "logoutNetDevice",
        NetControlPtz => "netControlPTZ",
        StartVoiceTalk => "startVoiceTalk",
        StopVoiceTalk => "stopVoiceTalk",
        SearchRecordFile => "searchRecordFile",
        SearchDeviceRecordFile => "searchDeviceRecordFile",
        OpenLoginPage => "openLoginPage",
        Logout => "logout",
        StartConfigWifi => "startConfigWifi",
        StopConfigWifi => "stopConfigWifi",
    }
}

impl SdkMethod {
    /// 是否需要先完成 initSDK
    pub fn requires_init(&self) -> bool {
        !matches!(
            self,
            SdkMethod::PlatformVersion
                | SdkMethod::SdkVersion
                | SdkMethod::InitSdk
                | SdkMethod::DestroySdk
                | SdkMethod::EnableLog
                | SdkMethod::EnableP2p
                | SdkMethod::StartConfigWifi
                | SdkMethod::StopConfigWifi
        )
    }

    /// 是否改变 SDK 生命周期（需要独占）
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, SdkMethod::InitSdk | SdkMethod::DestroySdk)
    }
}

method_table! {
    /// 播放视图通道方法
    PlayerMethod {
        InitPlayerByDevice => "initPlayerByDevice",
        InitPlayerUrl => "initPlayerUrl",
        InitPlayerByUser => "initPlayerByUser",
        StartRealPlay => "startRealPlay",
        StopRealPlay => "stopRealPlay",
        StartReplay => "startReplay",
        StopReplay => "stopReplay",
        PausePlayback => "pausePlayback",
        ResumePlayback => "resumePlayback",
        SeekPlayback => "seekPlayback",
        OsdTime => "getOSDTime",
        PlayerRelease => "playerRelease",
        SetPlayVerifyCode => "setPlayVerifyCode",
        OpenSound => "openSound",
        CloseSound => "closeSound",
        CapturePicture => "capturePicture",
        StartRecording => "startRecording",
        StopRecording => "stopRecording",
        IsRecording => "isRecording",
        SetPlaySpeed => "setPlaySpeed",
        StartLocalRecord => "startLocalRecord",
        StopLocalRecord => "stopLocalRecord",
        IsLocalRecording => "isLocalRecording",
    }
}

impl PlayerMethod {
    /// 是否需要 SDK 处于初始化状态；释放句柄与本地应答的方法除外
    pub fn requires_init(&self) -> bool {
        !matches!(
            self,
            PlayerMethod::PlayerRelease
                | PlayerMethod::IsRecording
                | PlayerMethod::IsLocalRecording
                | PlayerMethod::CapturePicture
                | PlayerMethod::StartRecording
                | PlayerMethod::StopRecording
                | PlayerMethod::SetPlaySpeed
                | PlayerMethod::StartLocalRecord
                | PlayerMethod::StopLocalRecord
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for method in SdkMethod::ALL {
            assert_eq!(SdkMethod::parse(method.as_str()), Some(*method));
        }
        for method in PlayerMethod::ALL {
            assert_eq!(PlayerMethod::parse(method.as_str()), Some(*method));
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(SdkMethod::parse("initSdk"), None);
        assert_eq!(PlayerMethod::parse("startRealPlay "), None);
        assert_eq!(SdkMethod::parse("startRealPlay"), None);
    }
}
