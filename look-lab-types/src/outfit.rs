use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::image::ImagePayload;

/// 服装槽位（封闭集合）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingSlot {
    Top,
    Bottom,
    Accessory,
}

impl ClothingSlot {
    /// 槽位数量。
    pub const COUNT: usize = 3;

    /// 全部槽位，按界面展示顺序排列。
    pub const ALL: [Self; Self::COUNT] = [Self::Top, Self::Bottom, Self::Accessory];

    /// 在 [`ClothingSlot::ALL`] 中的下标。
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
            Self::Accessory => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Accessory => "accessory",
        }
    }

    /// 上传入口的标题。
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Accessory => "Shoes / Accessory",
        }
    }

    /// 上传入口的提示语。
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Top => "e.g., shirt, t-shirt, jacket",
            Self::Bottom => "e.g., pants, skirt, jeans",
            Self::Accessory => "e.g., sneakers, hat, bag",
        }
    }
}

impl fmt::Display for ClothingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知槽位名称。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown clothing slot `{0}` (expected top, bottom or accessory)")]
pub struct UnknownSlot(pub String);

impl FromStr for ClothingSlot {
    type Err = UnknownSlot;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "accessory" | "shoes" => Ok(Self::Accessory),
            _ => Err(UnknownSlot(value.to_string())),
        }
    }
}

/// 一件服装：槽位 + 图像。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitItem {
    #[serde(rename = "type")]
    pub slot: ClothingSlot,
    pub data: ImagePayload,
}

impl OutfitItem {
    #[must_use]
    pub const fn new(slot: ClothingSlot, data: ImagePayload) -> Self {
        Self { slot, data }
    }
}

/// 上传目标：参考照片或某个服装槽位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadTarget {
    ReferencePhoto,
    Slot(ClothingSlot),
}

impl From<ClothingSlot> for UploadTarget {
    fn from(slot: ClothingSlot) -> Self {
        Self::Slot(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_parsing_is_case_insensitive() {
        assert_eq!("Top".parse::<ClothingSlot>().unwrap(), ClothingSlot::Top);
        assert_eq!(
            " accessory ".parse::<ClothingSlot>().unwrap(),
            ClothingSlot::Accessory
        );
        assert_eq!(
            "shoes".parse::<ClothingSlot>().unwrap(),
            ClothingSlot::Accessory
        );
        assert_eq!(
            "hat".parse::<ClothingSlot>().unwrap_err().to_string(),
            "unknown clothing slot `hat` (expected top, bottom or accessory)"
        );
    }

    #[test]
    fn slot_index_matches_all_order() {
        for (index, slot) in ClothingSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), index);
        }
    }

    #[test]
    fn outfit_item_uses_type_field() {
        let item = OutfitItem::new(
            ClothingSlot::Bottom,
            ImagePayload::new("data:image/png;base64,AQID"),
        );
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "bottom");
        assert_eq!(value["data"], "data:image/png;base64,AQID");
    }
}
