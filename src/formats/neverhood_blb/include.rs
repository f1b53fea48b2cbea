use binrw::BinRead;

pub const ID1: u32 = 0x0200_4940;
pub const ID2: u16 = 7;
pub const COMPRESSION_DCL: u8 = 3;
pub const MUSIC_RATE: u32 = 11025;

#[derive(BinRead)]
#[br(little)]
pub struct BlbHeader {
    pub id1: u32,
    pub id2: u16,
    pub ext_data_size: u16,
    pub file_size: u32,
    pub file_count: u32,
    #[br(count = file_count)]
    pub hashes: Vec<u32>,
}

#[derive(BinRead)]
#[br(little)]
pub struct BlbRecord {
    pub file_type: u8,
    pub compression: u8,
    _ext_data_offset: u16,
    _timestamp: u32,
    pub offset: u32,
    pub disk_size: u32,
    pub size: u32,
}

/// Resource names recovered from the game; everything else is named by its hash.
pub const KNOWN_HASHES: &[(u32, &str)] = &[
    (0x0002486A, "asRecFont"),
    (0x00302110, "sqDefault"),
    (0x0050004E, "paPodBlack"),
    (0x00918480, "stLineagex"),
    (0x01020D70, "HitArray"),
    (0x02038082, "paPodShade"),
    (0x041020CB, "bgRecPanelStart2"),
    (0x041023CB, "bgRecPanelStart1"),
    (0x04208A1C, "bgFatherHeader"),
    (0x0434000D, "meNumRows"),
    (0x04720052, "paPodFloor"),
    (0x0800A048, "ClickSwitch"),
    (0x0C05A30C, "bgQuaterHeader"),
    (0x1017021C, "paKlayFloor"),
    (0x240C2022, "meFirstChar"),
    (0x40041057, "fxDoorOpen24"),
    (0x40042057, "fxDoorOpen33"),
    (0x40401057, "fxDoorOpen20"),
    (0x404C0457, "fxDoorOpen03"),
    (0x40641057, "fxDoorOpen23"),
    (0x40642057, "fxDoorOpen32"),
    (0x4066014F, "fxDoorClose20"),
    (0x408C0034, "fx3LocksDisable"),
    (0x41050240, "meCharHeight"),
    (0x4225014F, "fxDoorClose32"),
    (0x4226014F, "fxDoorClose23"),
    (0x4425014F, "fxDoorClose33"),
    (0x4426014F, "fxDoorClose24"),
    (0x4600204C, "fxFogHornSoft"),
    (0x46431401, "GoToStartLoop/Finish"),
    (0x48442057, "fxDoorOpen38"),
    (0x530520E0, "meTracking"),
    (0x5410088A, "Ashooded"),
    (0x60352180, "meCharWidth"),
    (0x70230380, "paKlayShade"),
    (0x90100314, "paKlayBlack"),
    (0xB208B1B6, "meArchroArchRoomPath"),
    (0xC025014F, "fxDoorClose38"),
    (0xC2478500, "PopBalloon"),
];

/// Headerless 16-bit mono PCM tracks.
pub const MUSIC_HASHES: &[u32] = &[
    0x00203197, 0x04020210, 0x05343184, 0x061880C6, 0x06333232, 0x11482B95,
    0x31114225, 0x601C908C, 0x62222CAE, 0x624A220E, 0xB110382D, 0xD2FA4D14,
];

pub fn known_name(hash: u32) -> Option<&'static str> {
    KNOWN_HASHES.iter().find(|(h, _)| *h == hash).map(|(_, name)| *name)
}
