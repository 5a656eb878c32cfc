//! 上传/选择状态：参考照片 + 按槽位保存的服装。

use look_lab_types::image::ImagePayload;
use look_lab_types::outfit::{ClothingSlot, OutfitItem, UploadTarget};

/// 当前搭配。
///
/// 每个槽位最多一件；顺序为各槽位首次放入的顺序，替换不会改变位置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutfitCollection {
    slots: [Option<ImagePayload>; ClothingSlot::COUNT],
    order: Vec<ClothingSlot>,
}

impl OutfitCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 放入一件服装；槽位已占用时原位替换并返回旧图像。
    pub fn insert(&mut self, slot: ClothingSlot, payload: ImagePayload) -> Option<ImagePayload> {
        let previous = self.slots[slot.index()].replace(payload);
        if previous.is_none() {
            self.order.push(slot);
        }
        previous
    }

    #[must_use]
    pub fn get(&self, slot: ClothingSlot) -> Option<&ImagePayload> {
        self.slots[slot.index()].as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 已占用的槽位（按首次放入顺序）。
    #[must_use]
    pub fn slots(&self) -> &[ClothingSlot] {
        &self.order
    }

    /// 按顺序遍历 `(slot, payload)`。
    pub fn iter(&self) -> impl Iterator<Item = (ClothingSlot, &ImagePayload)> + '_ {
        self.order
            .iter()
            .filter_map(|slot| self.get(*slot).map(|payload| (*slot, payload)))
    }

    /// 按顺序拷贝出全部服装。
    #[must_use]
    pub fn to_items(&self) -> Vec<OutfitItem> {
        self.iter()
            .map(|(slot, payload)| OutfitItem::new(slot, payload.clone()))
            .collect()
    }
}

impl FromIterator<OutfitItem> for OutfitCollection {
    fn from_iter<I: IntoIterator<Item = OutfitItem>>(iter: I) -> Self {
        let mut outfit = Self::new();
        for item in iter {
            outfit.insert(item.slot, item.data);
        }
        outfit
    }
}

/// 会话内的全部上传。
#[derive(Debug, Clone, Default)]
pub struct Wardrobe {
    reference: Option<ImagePayload>,
    outfit: OutfitCollection,
}

impl Wardrobe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次上传；参考照片总是直接替换，服装按槽位原位替换或追加。
    pub fn upload(&mut self, target: impl Into<UploadTarget>, payload: ImagePayload) {
        match target.into() {
            UploadTarget::ReferencePhoto => {
                tracing::debug!(image = ?payload, "reference photo updated");
                self.reference = Some(payload);
            }
            UploadTarget::Slot(slot) => {
                tracing::debug!(%slot, image = ?payload, "outfit item uploaded");
                if self.outfit.insert(slot, payload).is_some() {
                    tracing::debug!(%slot, "replaced existing outfit item");
                }
            }
        }
    }

    #[must_use]
    pub const fn reference_photo(&self) -> Option<&ImagePayload> {
        self.reference.as_ref()
    }

    #[must_use]
    pub const fn outfit(&self) -> &OutfitCollection {
        &self.outfit
    }

    /// 某个上传入口最近一次上传的图像。
    #[must_use]
    pub fn preview(&self, target: UploadTarget) -> Option<&ImagePayload> {
        match target {
            UploadTarget::ReferencePhoto => self.reference.as_ref(),
            UploadTarget::Slot(slot) => self.outfit.get(slot),
        }
    }

    /// 是否已有参考照片与至少一件服装。
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.reference.is_some() && !self.outfit.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(tag: &str) -> ImagePayload {
        ImagePayload::new(format!("data:image/png;base64,{tag}"))
    }

    #[test]
    fn replacing_a_slot_keeps_its_position() {
        let mut outfit = OutfitCollection::new();
        assert!(outfit.insert(ClothingSlot::Bottom, image("b1")).is_none());
        assert!(outfit.insert(ClothingSlot::Top, image("t1")).is_none());
        assert_eq!(
            outfit.insert(ClothingSlot::Bottom, image("b2")),
            Some(image("b1"))
        );

        assert_eq!(outfit.len(), 2);
        assert_eq!(outfit.slots(), &[ClothingSlot::Bottom, ClothingSlot::Top]);
        let items = outfit.to_items();
        assert_eq!(items[0], OutfitItem::new(ClothingSlot::Bottom, image("b2")));
        assert_eq!(items[1], OutfitItem::new(ClothingSlot::Top, image("t1")));
    }

    #[test]
    fn arbitrary_insert_sequences_never_duplicate_slots() {
        let slots = ClothingSlot::ALL;
        let mut outfit = OutfitCollection::new();
        let mut first_seen: Vec<ClothingSlot> = Vec::new();
        for step in 0..30usize {
            let slot = slots[(step * 7 + step / 3) % slots.len()];
            outfit.insert(slot, image(&format!("s{step}")));
            if !first_seen.contains(&slot) {
                first_seen.push(slot);
            }

            let mut seen = outfit.slots().to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), outfit.len());
            assert_eq!(outfit.slots(), first_seen.as_slice());
            assert_eq!(outfit.get(slot), Some(&image(&format!("s{step}"))));
        }
    }

    #[test]
    fn collect_applies_last_write_wins() {
        let outfit: OutfitCollection = vec![
            OutfitItem::new(ClothingSlot::Top, image("t1")),
            OutfitItem::new(ClothingSlot::Accessory, image("a1")),
            OutfitItem::new(ClothingSlot::Top, image("t2")),
        ]
        .into_iter()
        .collect();
        assert_eq!(outfit.len(), 2);
        assert_eq!(outfit.get(ClothingSlot::Top), Some(&image("t2")));
        assert_eq!(
            outfit.slots(),
            &[ClothingSlot::Top, ClothingSlot::Accessory]
        );
    }

    #[test]
    fn reference_photo_is_replaced_unconditionally() {
        let mut wardrobe = Wardrobe::new();
        assert!(!wardrobe.is_ready());

        wardrobe.upload(UploadTarget::ReferencePhoto, image("r1"));
        wardrobe.upload(UploadTarget::ReferencePhoto, image("r2"));
        assert_eq!(wardrobe.reference_photo(), Some(&image("r2")));
        assert!(wardrobe.outfit().is_empty());
        assert!(!wardrobe.is_ready());

        wardrobe.upload(ClothingSlot::Top, image("t1"));
        assert!(wardrobe.is_ready());
    }

    #[test]
    fn preview_reflects_last_upload() {
        let mut wardrobe = Wardrobe::new();
        assert!(wardrobe.preview(UploadTarget::Slot(ClothingSlot::Top)).is_none());

        wardrobe.upload(ClothingSlot::Top, image("t1"));
        wardrobe.upload(ClothingSlot::Top, image("t2"));
        wardrobe.upload(UploadTarget::ReferencePhoto, image("r1"));

        assert_eq!(
            wardrobe.preview(UploadTarget::Slot(ClothingSlot::Top)),
            Some(&image("t2"))
        );
        assert_eq!(
            wardrobe.preview(UploadTarget::ReferencePhoto),
            Some(&image("r1"))
        );
        assert_eq!(wardrobe.outfit().len(), 1);
    }

    #[test]
    fn uploads_are_not_validated() {
        let mut wardrobe = Wardrobe::new();
        wardrobe.upload(UploadTarget::ReferencePhoto, ImagePayload::new("not a data uri"));
        assert_eq!(
            wardrobe.reference_photo().map(ImagePayload::as_str),
            Some("not a data uri")
        );
    }
}
