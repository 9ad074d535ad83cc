pub mod article;
pub mod article_content;
pub mod article_content_image;
pub mod category;
pub mod city;
pub mod popular_tag;
pub mod province;
