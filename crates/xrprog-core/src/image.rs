//! Compiled-in factory configuration images
//!
//! [`RUNTIME_IMAGE`] holds the factory runtime configuration as raw hex
//! records (length, address, record type, data, checksum - everything but
//! the start code), consumed by the record dispatcher exactly as a streamed
//! file would be. [`FLASH_IMAGE`] is the matching non-volatile image as a
//! flat copy of 64-byte pages for the page programmer.

/// Factory runtime configuration records, terminator included
pub static RUNTIME_IMAGE: &[&[u8]] = &[
    &[
        0x10, 0x80, 0x72, 0x00, 0x00, 0x02, 0x50, 0x00, 0x00, 0xFF, 0xFF, 0xFA, 0x06, 0xFA, 0x04,
        0xFA, 0x02, 0x96, 0x01, 0x00, 0x1D,
    ],
    &[
        0x10, 0x80, 0x82, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x04, 0x00, 0x07,
        0x00, 0x00, 0x00, 0x00, 0x64, 0x7D,
    ],
    &[
        0x10, 0x80, 0x92, 0x00, 0x21, 0x64, 0x64, 0x64, 0x21, 0x64, 0x64, 0x64, 0x21, 0x64, 0x64,
        0x64, 0x21, 0x64, 0x64, 0x0A, 0x04,
    ],
    &[
        0x0B, 0x80, 0xA2, 0x00, 0x20, 0x0A, 0x05, 0x19, 0x00, 0xFF, 0x00, 0x00, 0x00, 0xFF, 0xFF,
        0x8E,
    ],
    &[
        0x10, 0x80, 0xAE, 0x00, 0x04, 0xFF, 0xFF, 0x6C, 0x64, 0x42, 0x50, 0x30, 0x18, 0x0C, 0x30,
        0x00, 0x00, 0x00, 0x00, 0x00, 0xDA,
    ],
    &[
        0x10, 0x80, 0xBE, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0xAF,
    ],
    &[0x04, 0x80, 0xCE, 0x00, 0x00, 0x00, 0x00, 0x1D, 0x91],
    &[
        0x10, 0xC0, 0x00, 0x00, 0xFF, 0xC5, 0x00, 0x0A, 0x03, 0x41, 0x00, 0xFA, 0x02, 0xDA, 0x20,
        0x27, 0xE1, 0x28, 0x33, 0x0D, 0xB8,
    ],
    &[
        0x10, 0xC0, 0x10, 0x00, 0x00, 0x00, 0x03, 0x00, 0x56, 0x00, 0x12, 0x02, 0x69, 0x97, 0x4A,
        0x26, 0x28, 0x3C, 0x20, 0x01, 0xBE,
    ],
    &[
        0x10, 0xC0, 0x20, 0x00, 0x01, 0x01, 0x01, 0x01, 0x01, 0x1E, 0x1E, 0xCE, 0x04, 0xB0, 0x0D,
        0x00, 0x40, 0x00, 0x40, 0xCB, 0xF5,
    ],
    &[
        0x0F, 0xC0, 0x30, 0x00, 0x00, 0x12, 0x6C, 0x1E, 0x1E, 0x0C, 0x2E, 0x69, 0x98, 0x0A, 0x4D,
        0x20, 0x00, 0x00, 0x08, 0x8D,
    ],
    &[
        0x10, 0xC1, 0x00, 0x00, 0xFF, 0xC5, 0x00, 0x0A, 0x03, 0x41, 0x00, 0xFA, 0x02, 0xDA, 0x20,
        0x13, 0xE1, 0x14, 0x33, 0x0D, 0xDF,
    ],
    &[
        0x10, 0xC1, 0x10, 0x00, 0x00, 0x00, 0x03, 0x00, 0x50, 0x00, 0x11, 0x02, 0x65, 0x9B, 0x4E,
        0x24, 0x26, 0x3C, 0x14, 0x08, 0xC9,
    ],
    &[
        0x10, 0xC1, 0x20, 0x00, 0x08, 0x08, 0x08, 0x08, 0x08, 0x1D, 0x1E, 0xCE, 0x04, 0xB0, 0x0D,
        0x00, 0x40, 0x00, 0x40, 0xCB, 0xD2,
    ],
    &[
        0x0F, 0xC1, 0x30, 0x00, 0x00, 0x3E, 0x64, 0x7B, 0x7B, 0x1D, 0xF2, 0x48, 0x05, 0x1A, 0x26,
        0x20, 0x00, 0x11, 0x18, 0x83,
    ],
    &[
        0x10, 0xC2, 0x00, 0x00, 0xFF, 0xC5, 0x00, 0x0A, 0x03, 0x41, 0x00, 0xFA, 0x02, 0xDA, 0x20,
        0x09, 0xE1, 0x14, 0x33, 0x0D, 0xE8,
    ],
    &[
        0x10, 0xC2, 0x10, 0x00, 0x00, 0x00, 0x04, 0x00, 0x6A, 0x00, 0x16, 0x02, 0x45, 0xBB, 0x5F,
        0x2D, 0x31, 0x3C, 0x1A, 0x02, 0x83,
    ],
    &[
        0x10, 0xC2, 0x20, 0x00, 0x02, 0x02, 0x02, 0x02, 0x02, 0x1C, 0x1E, 0xCE, 0x04, 0xB0, 0x0D,
        0x00, 0x40, 0x00, 0x40, 0xCB, 0xF0,
    ],
    &[
        0x0F, 0xC2, 0x30, 0x00, 0x00, 0x35, 0x42, 0x7B, 0x7B, 0x16, 0x48, 0x57, 0xE5, 0x12, 0x07,
        0x20, 0x00, 0x21, 0x18, 0x86,
    ],
    &[
        0x10, 0xC3, 0x00, 0x00, 0xFF, 0xC5, 0x00, 0x0A, 0x03, 0x41, 0x00, 0xFA, 0x02, 0xDA, 0x20,
        0x27, 0xE1, 0x28, 0x33, 0x0D, 0xB5,
    ],
    &[
        0x10, 0xC3, 0x10, 0x00, 0x00, 0x00, 0x03, 0x00, 0x40, 0x00, 0x0D, 0x02, 0x51, 0xAF, 0x58,
        0x3F, 0x45, 0x3C, 0x10, 0x40, 0x63,
    ],
    &[
        0x10, 0xC3, 0x20, 0x00, 0x40, 0x40, 0x40, 0x40, 0x40, 0x1E, 0x1E, 0xCE, 0x04, 0xB0, 0x0D,
        0x00, 0x40, 0x00, 0x40, 0xCB, 0xB7,
    ],
    &[
        0x0F, 0xC3, 0x30, 0x00, 0x00, 0x43, 0x50, 0x1E, 0x1E, 0x19, 0x5C, 0x4F, 0x6F, 0x17, 0x40,
        0x29, 0x77, 0x01, 0x18, 0xEC,
    ],
    &[
        0x10, 0xC4, 0x00, 0x00, 0x05, 0x0F, 0xFF, 0x4C, 0x4F, 0x4C, 0x1E, 0x1C, 0x00, 0x30, 0x01,
        0x9F, 0x55, 0x04, 0x04, 0x00, 0xCB,
    ],
    &[
        0x0F, 0xC4, 0x10, 0x00, 0x10, 0x16, 0x04, 0x0A, 0x10, 0x00, 0x00, 0x00, 0x00, 0x20, 0x0F,
        0x17, 0x10, 0x17, 0x0F, 0x5D,
    ],
    &[0x07, 0xD0, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x37, 0x00, 0xEF],
    &[
        0x10, 0xD0, 0x09, 0x00, 0x0F, 0x04, 0x02, 0x06, 0x02, 0x0A, 0x09, 0x0B, 0x09, 0x00, 0x00,
        0x00, 0x00, 0x0F, 0x00, 0x02, 0xC2,
    ],
    &[
        0x0F, 0xD0, 0x19, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04,
        0x04, 0x00, 0x00, 0x00, 0xFF,
    ],
    &[0x05, 0xD3, 0x02, 0x00, 0x61, 0x62, 0x61, 0x61, 0x61, 0x40],
    &[0x01, 0xD3, 0x08, 0x00, 0x00, 0x24],
    &[0x04, 0xD9, 0x00, 0x00, 0x62, 0x01, 0x62, 0xFA, 0x64],
    &[0x01, 0xFF, 0xA4, 0x00, 0x80, 0xDC],
    &[0x01, 0xFF, 0xA6, 0x00, 0x00, 0x5A],
    &[0x01, 0xFF, 0xA9, 0x00, 0x00, 0x57],
    &[0x01, 0xFF, 0xAB, 0x00, 0xFF, 0x56],
    &[0x01, 0xFF, 0xAD, 0x00, 0x12, 0x41],
    &[0x01, 0xFF, 0xAF, 0x00, 0x02, 0x4F],
    &[0x01, 0xFF, 0xB2, 0x00, 0xE2, 0x6C],
    &[0x01, 0xFF, 0xDC, 0x00, 0x00, 0x24],
    &[0x00, 0x00, 0x00, 0x01, 0xFF],
];

/// Factory flash image: 7 x 64-byte pages spanning 0x0000 to 0x01BF
pub static FLASH_IMAGE: &[u8] = &[
    0xFF, 0xC5, 0x00, 0x0A, 0x03, 0x41, 0x00, 0xFA, 0x02, 0xDA, 0x20, 0x13, 0xE1, 0x14, 0x33, 0x0D,
    0x00, 0x00, 0x03, 0x00, 0x50, 0x00, 0x11, 0x02, 0x15, 0xEB, 0x4E, 0x29, 0x2B, 0x3C, 0x14, 0x01,
    0x01, 0x01, 0x01, 0x01, 0x01, 0x1C, 0x1E, 0xCE, 0x04, 0xB0, 0x0D, 0x00, 0x40, 0x00, 0x40, 0xCB,
    0x00, 0x48, 0x64, 0x3D, 0x3D, 0x21, 0x65, 0x41, 0x44, 0x1D, 0x73, 0x21, 0x7F, 0x11, 0x18, 0xA4,
    0xFF, 0xC5, 0x00, 0x0A, 0x03, 0x41, 0x00, 0xFA, 0x02, 0xDA, 0x20, 0x1D, 0xE1, 0x14, 0x33, 0x0D,
    0x00, 0x00, 0x04, 0x00, 0x6A, 0x00, 0x16, 0x02, 0x0D, 0xF3, 0x5F, 0x35, 0x3A, 0x3C, 0x0D, 0x04,
    0x04, 0x04, 0x04, 0x04, 0x04, 0x1B, 0x1E, 0xCE, 0x04, 0xB0, 0x0D, 0x00, 0x40, 0x00, 0x40, 0xCB,
    0x00, 0x76, 0x42, 0x7B, 0x7B, 0x17, 0x39, 0x54, 0xC7, 0x14, 0x1A, 0x23, 0x7D, 0x22, 0x28, 0xF7,
    0xFF, 0xC5, 0x00, 0x0A, 0x03, 0x41, 0x00, 0xFA, 0x02, 0xDA, 0x20, 0x27, 0xE1, 0x28, 0x33, 0x0D,
    0x00, 0x00, 0x03, 0x00, 0x40, 0x00, 0x0D, 0x02, 0x11, 0xEF, 0x58, 0x4D, 0x56, 0x3C, 0x10, 0x80,
    0x80, 0x80, 0x80, 0x80, 0x80, 0x1D, 0x1E, 0xCE, 0x04, 0xB0, 0x0D, 0x00, 0x40, 0x00, 0x40, 0xCB,
    0x00, 0x44, 0x50, 0x1E, 0x1E, 0x17, 0xD6, 0x52, 0x56, 0x15, 0xDD, 0x2A, 0x76, 0x01, 0x18, 0x76,
    0xFF, 0xC5, 0x00, 0x0A, 0x03, 0x41, 0x00, 0xFA, 0x02, 0xDA, 0x20, 0x13, 0xE1, 0x28, 0x33, 0x0D,
    0x00, 0x00, 0x05, 0x00, 0x73, 0x00, 0x18, 0x02, 0x91, 0x6F, 0x5C, 0x2E, 0x31, 0x3C, 0x16, 0x40,
    0x40, 0x40, 0x40, 0x40, 0x40, 0x1D, 0x1E, 0xCE, 0x04, 0xB0, 0x0D, 0x00, 0x40, 0x00, 0x40, 0xCB,
    0x00, 0x22, 0x48, 0x3D, 0x3D, 0x22, 0x27, 0x41, 0x68, 0x1C, 0xA8, 0x20, 0x00, 0x10, 0x08, 0x8F,
    0x05, 0x00, 0x00, 0x4C, 0x4F, 0x4C, 0x1E, 0x1C, 0x00, 0x30, 0x01, 0x9F, 0x55, 0x02, 0x02, 0x00,
    0x08, 0x16, 0x04, 0x0A, 0x10, 0x00, 0x00, 0x00, 0x00, 0x10, 0x0F, 0x17, 0x10, 0x17, 0x0F, 0x64,
    0x42, 0x50, 0x48, 0x18, 0x0C, 0x30, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0x00, 0x00, 0x00, 0xE1,
    0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x37, 0x00, 0x00, 0x0F, 0x02, 0x03, 0x02, 0x04, 0x09, 0x09,
    0x09, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x0F, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x04, 0x04, 0x00, 0x00, 0x00, 0x62, 0x61, 0x61, 0x61, 0x61, 0x00, 0x00, 0x62,
    0x01, 0x62, 0xFA, 0x00, 0x80, 0x00, 0x00, 0xFF, 0x12, 0x02, 0xE1, 0x00, 0x1E, 0x00, 0x00, 0xD5,
    0x00, 0x02, 0x50, 0x00, 0x00, 0xFF, 0xFF, 0x32, 0x04, 0x32, 0x06, 0x32, 0x00, 0x00, 0x03, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x04, 0x00, 0x07, 0x00, 0x00, 0x00, 0x00, 0x64,
    0x21, 0x64, 0x64, 0x64, 0x20, 0x64, 0x64, 0x64, 0x21, 0x64, 0x64, 0x64, 0x22, 0x64, 0x64, 0x0A,
    0x20, 0x0A, 0x05, 0x19, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x04, 0xFF, 0xFF, 0x12,
];
