use repositories::Registry;
use services::serializers::{BlogSerializer, CoverImageSerializer, UserProfileSerializer};

/// Serializers wired to one registry's tables
pub struct Serializers {
    pub blog: BlogSerializer,
    pub cover_image: CoverImageSerializer,
    pub user_profile: UserProfileSerializer,
}

impl Serializers {
    pub fn new(registry: &Registry) -> Self {
        Self {
            blog: BlogSerializer::new(registry.blog_dependencies()),
            cover_image: CoverImageSerializer::new(),
            user_profile: UserProfileSerializer::new(registry.user_profile_dependencies()),
        }
    }
}
